//! Thin proxy over the RAWG API backing the search, popular, and top-rated pages.

use crate::{
    dto::discovery::{PageQuery, SearchQuery},
    error::ServiceError,
    rawg::{RawgGame, RawgGamePage},
    state::SharedState,
};

const FIRST_PAGE: u32 = 1;

fn page_number(page: Option<u32>) -> u32 {
    page.filter(|page| *page >= FIRST_PAGE).unwrap_or(FIRST_PAGE)
}

/// Search RAWG by free text.
pub async fn search(state: &SharedState, query: SearchQuery) -> Result<RawgGamePage, ServiceError> {
    let Some(text) = query.q.map(|q| q.trim().to_owned()).filter(|q| !q.is_empty()) else {
        return Err(ServiceError::InvalidInput("q is required".into()));
    };
    let metadata = state.require_metadata()?;
    Ok(metadata.search_games(text, page_number(query.page)).await?)
}

/// Games RAWG users added the most.
pub async fn popular(state: &SharedState, query: PageQuery) -> Result<RawgGamePage, ServiceError> {
    let metadata = state.require_metadata()?;
    Ok(metadata.popular_games(page_number(query.page)).await?)
}

/// Games with the best Metacritic scores.
pub async fn top_rated(state: &SharedState, query: PageQuery) -> Result<RawgGamePage, ServiceError> {
    let metadata = state.require_metadata()?;
    Ok(metadata.top_rated_games(page_number(query.page)).await?)
}

/// Full RAWG details for one game.
pub async fn details(state: &SharedState, id: u64) -> Result<RawgGame, ServiceError> {
    let metadata = state.require_metadata()?;
    Ok(metadata.game_details(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rawg::RawgError,
        testing::{MockMetadataSource, json_state, rawg_game},
    };

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some(0)), 1);
        assert_eq!(page_number(Some(4)), 4);
    }

    #[tokio::test]
    async fn search_requires_text_and_a_configured_source() {
        let dir = tempfile::tempdir().unwrap();
        let unconfigured = json_state(dir.path(), None);

        let err = search(&unconfigured, SearchQuery { q: Some(" ".into()), page: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let err = search(&unconfigured, SearchQuery { q: Some("hades".into()), page: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(RawgError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn proxies_forward_to_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = MockMetadataSource::new();
        metadata.add_game(rawg_game(1, "Hades"));
        metadata.add_game(rawg_game(2, "Celeste"));
        let state = json_state(dir.path(), Some(metadata));

        let page = search(&state, SearchQuery { q: Some("had".into()), page: Some(2) })
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].name, "Hades");

        assert_eq!(popular(&state, PageQuery::default()).await.unwrap().count, 2);
        assert_eq!(details(&state, 2).await.unwrap().name, "Celeste");
        assert!(matches!(
            details(&state, 3).await,
            Err(ServiceError::Upstream(RawgError::NotFound { .. }))
        ));
    }
}
