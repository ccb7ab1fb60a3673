//! Fixed-priority arbitration.
//!
//! Both the result-bus arbiter and the memory-port arbiter resolve contention the
//! same way: resources are handed out in ascending requester order, so resource
//! `k` goes to the `k`-th lowest-indexed requester that is asserting a request.
//! Requesters beyond the number of resources are simply not granted this cycle.
//! There is no rotation or aging, so a high-index requester can starve for as long
//! as lower-index requesters keep asserting.

/// Anything that can assert a request line.
pub trait Requester {
    /// Whether the request line is asserted this cycle.
    fn requesting(&self) -> bool;
}

impl Requester for bool {
    fn requesting(&self) -> bool {
        *self
    }
}

/// Selects up to `resources` requesters in ascending index order.
///
/// # Arguments
///
/// * `requesters` - Request lines, indexed by requester priority (0 is highest).
/// * `resources`  - Number of identical resources available this cycle.
///
/// # Returns
///
/// The granted requester indices; entry `k` is the requester granted resource `k`.
/// The vector is shorter than `resources` when fewer requesters are asserting.
pub fn select_lowest<R: Requester>(requesters: &[R], resources: usize) -> Vec<usize> {
    requesters
        .iter()
        .enumerate()
        .filter(|(_, r)| r.requesting())
        .map(|(index, _)| index)
        .take(resources)
        .collect()
}
