use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

/// OpenAPI 3 description of the HTTP surface, kept next to the routes it documents.
pub const OPENAPI_DOCUMENT: &str = include_str!("openapi.json");

/// GET /openapi.json
pub async fn openapi_document() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/json")], OPENAPI_DOCUMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn document_is_valid_json_covering_every_route() {
        let doc: Value = serde_json::from_str(OPENAPI_DOCUMENT).expect("openapi.json parses");
        let paths = doc["paths"].as_object().expect("paths object");
        assert!(paths["/"]["get"].is_object());
        for method in ["get", "post"] {
            assert!(paths["/articles"][method].is_object(), "/articles {method}");
        }
        for method in ["get", "put", "delete"] {
            assert!(paths["/articles/{id}"][method].is_object(), "/articles/{{id}} {method}");
        }
        for schema in ["Article", "ArticleInput", "ErrorMessage", "ValidationError"] {
            assert!(doc["components"]["schemas"][schema].is_object(), "{schema}");
        }
    }
}
