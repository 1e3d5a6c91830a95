//! Disjunction enumeration.
//!
//! Every unordered pair of distinct cases sharing a session is a
//! potential time conflict that the model must resolve with a
//! before/after decision. This module produces that conflict set.
//!
//! # Complexity
//! Exactly `C(n,2) * s` triples for `n` cases and `s` sessions —
//! quadratic in case count, linear in session count. This is the model's
//! constraint-count scalability ceiling: each triple contributes one
//! ordering binary and two constraint rows.

use super::model::Disjunction;

/// Enumerates the deduplicated (case_a, case_b, session) conflict set.
///
/// One canonical ordering (`case_a < case_b` by index) is kept per
/// unordered pair per session, so the mirror triple
/// (case_b, case_a, session) never co-exists with it.
pub fn enumerate_disjunctions(case_count: usize, session_count: usize) -> Vec<Disjunction> {
    let pair_count = case_count.saturating_sub(1) * case_count / 2;
    let mut disjunctions = Vec::with_capacity(pair_count * session_count);

    for session in 0..session_count {
        for case_a in 0..case_count {
            for case_b in (case_a + 1)..case_count {
                disjunctions.push(Disjunction {
                    case_a,
                    case_b,
                    session,
                });
            }
        }
    }

    disjunctions
}
