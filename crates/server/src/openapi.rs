use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc {
    #[schema(example = "error description")]
    pub error: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongDoc {
    pub id: i32,
    pub group: String,
    pub name: String,
    #[schema(example = "16.07.2006")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

#[derive(Serialize, ToSchema)]
pub struct SongDetailsDoc {
    #[schema(example = "Muse")]
    pub group: String,
    #[schema(example = "Supermassive Black Hole")]
    pub song: String,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateParamsDoc {
    pub group_name: String,
    pub song_name: String,
    #[schema(example = "16.07.2006")]
    pub release_date: String,
    pub song_text: String,
    pub link: String,
}

#[derive(Serialize, ToSchema)]
pub struct VerseDoc {
    #[schema(example = "1")]
    pub num: String,
    pub text: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::songs::create,
        crate::routes::songs::update,
        crate::routes::songs::delete,
        crate::routes::songs::get_verse,
        crate::routes::songs::search,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            SongDoc,
            SongDetailsDoc,
            UpdateParamsDoc,
            VerseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "songs", description = "Song catalog")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/songs"));
        assert!(paths.contains_key("/songs/{id}"));
        assert!(paths.contains_key("/songs/{id}/verse/{vid}"));
        assert!(paths.contains_key("/songs/page/{page_num}/records/{per_page}"));
        assert!(doc["components"]["schemas"]["SongDoc"]["properties"]["releaseDate"].is_object());
    }
}
