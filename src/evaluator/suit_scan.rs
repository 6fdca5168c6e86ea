use super::rank_scan::{straight_ranks, RunTracker};
use super::sort_code::{Hand, HandType};
use crate::cards::Rank;

/// Most cards of one suit a Hold'em hand can hold.
const MAX_SUITED: usize = 7;

/// Best flush or straight flush among the ranks held in one suit, or `None`
/// with fewer than five of them.
///
/// A straight flush wins over a plain flush in the same suit; the ace is
/// tried low only while looking for the straight.
pub(crate) fn flush_hand(suited: &[Rank]) -> Option<Hand> {
    if suited.len() < 5 {
        return None;
    }
    let n = suited.len().min(MAX_SUITED);
    let mut buf = [Rank::Two; MAX_SUITED];
    buf[..n].copy_from_slice(&suited[..n]);
    let sorted = &mut buf[..n];
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut run = RunTracker::default();
    for r in sorted.iter() {
        run.occupied(r.value());
    }
    if sorted[0] == Rank::Ace {
        run.occupied(Rank::ACE_LOW);
    }
    if let Some(top) = run.straight_top() {
        return Some(Hand::from_seq(HandType::StraightFlush, straight_ranks(top)));
    }
    Some(Hand::new(HandType::Flush, &sorted[..5]))
}
