//! Turning fetch results into what the Home, Alumni and About pages show.

use crate::error::StoreError;
use crate::model::{AdvisoryMember, AlumniMember, Book, TeamMember};
use crate::store::StoreResult;
use crate::view::{Carousel, LoadState};

pub const NO_BOOKS: &str = "No books available at the moment.";
pub const NO_ALUMNI: &str = "No alumni records found. Check back later for updates.";
pub const TEAM_FAILED: &str = "Failed to load team data. Please try again later.";

/// The About page's two people sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamData {
    pub advisory: Vec<AdvisoryMember>,
    pub team: Vec<TeamMember>,
}

/// Home page "New Arrivals" section.
pub fn new_arrivals(result: StoreResult<Vec<Book>>) -> LoadState<Carousel<Book>> {
    match result {
        Ok(books) if books.is_empty() => LoadState::Empty(NO_BOOKS),
        Ok(books) => LoadState::Ready(Carousel::new(books)),
        Err(err) => LoadState::Failed(format!("Failed to load books: {}", err.message())),
    }
}

/// Alumni page listing.
pub fn alumni(result: StoreResult<Vec<AlumniMember>>) -> LoadState<Vec<AlumniMember>> {
    match result {
        Ok(members) if members.is_empty() => LoadState::Empty(NO_ALUMNI),
        Ok(members) => LoadState::Ready(members),
        Err(err) => LoadState::Failed(format!(
            "{}. Please try refreshing the page or contact support if the problem persists.",
            err.message()
        )),
    }
}

/// About page team sections. Both sections render even when empty.
pub fn team(result: Result<TeamData, StoreError>) -> LoadState<TeamData> {
    match result {
        Ok(data) => LoadState::Ready(data),
        Err(err) => {
            log::warn!("Failed to load team data: {}", err);
            LoadState::Failed(TEAM_FAILED.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlumniId;

    #[test]
    fn test_new_arrivals_states() {
        assert_eq!(new_arrivals(Ok(Vec::new())), LoadState::Empty(NO_BOOKS));

        let failed = new_arrivals(Err(StoreError::network("Failed to fetch books")));
        assert_eq!(
            failed,
            LoadState::Failed("Failed to load books: Failed to fetch books".to_string())
        );

        let ready = new_arrivals(Ok(vec![Book::new("1", "T", "A")]));
        assert_eq!(ready.ready().unwrap().items().len(), 1);
    }

    #[test]
    fn test_alumni_states() {
        assert_eq!(alumni(Ok(Vec::new())), LoadState::Empty(NO_ALUMNI));

        let LoadState::Failed(message) = alumni(Err(StoreError::network("HTTP 502"))) else {
            panic!("expected failure");
        };
        assert!(message.starts_with("HTTP 502. Please try refreshing"));

        let member = AlumniMember {
            id: AlumniId::new("a"),
            name: "N".to_string(),
            designation: "D".to_string(),
            batch: "2020".to_string(),
            image: String::new(),
        };
        assert!(alumni(Ok(vec![member])).is_ready());
    }

    #[test]
    fn test_team_failure_message_is_fixed() {
        let state = team(Err(StoreError::network("connection refused")));
        assert_eq!(state, LoadState::Failed(TEAM_FAILED.to_string()));
        assert!(team(Ok(TeamData::default())).is_ready());
    }

    #[test]
    fn test_load_state_map() {
        let state: LoadState<Vec<u8>> = LoadState::Ready(vec![1, 2]);
        assert_eq!(state.map(|v| v.len()), LoadState::Ready(2));
        let loading: LoadState<u8> = LoadState::Loading;
        assert_eq!(loading.map(|v| v + 1), LoadState::Loading);
    }
}
