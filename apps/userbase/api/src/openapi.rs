use utoipa::OpenApi;

/// Root API documentation; domain docs are nested under their mount paths.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Userbase API",
        version = "0.1.0",
        description = "User management with unique email addresses"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/users"), "{paths:?}");
        assert!(paths.contains(&"/users/{id}"), "{paths:?}");
        assert!(paths.contains(&"/users/summary"), "{paths:?}");
        assert!(paths.contains(&"/users/by-email/{email}"), "{paths:?}");
    }
}
