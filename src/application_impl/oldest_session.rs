use crate::domain_model::*;

/// The session with the earliest `last_activity`, together with its verifier.
///
/// Sessions without activity data are never candidates, so `None` comes back
/// for an empty collection and for one where no session has been stamped.
/// Ties go to whichever candidate iteration reaches first; `HashMap` order is
/// unspecified, so equal timestamps may resolve differently between calls.
pub fn find_oldest(sessions: &SessionCollection) -> Option<(&Verifier, &Session)> {
    let mut oldest: Option<(&Verifier, &Session)> = None;

    for (verifier, session) in sessions {
        let Some(last_activity) = session.last_activity else {
            continue;
        };
        match oldest {
            Some((_, current)) if current.last_activity <= Some(last_activity) => {}
            _ => oldest = Some((verifier, session)),
        }
    }

    oldest
}
