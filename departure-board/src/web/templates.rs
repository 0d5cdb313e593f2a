//! Askama templates for the web frontend.

use askama::Template;

/// Departure board page. The board itself is filled in client-side from
/// the JSON API.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub station_code: String,
    pub station_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_station() {
        let html = IndexTemplate {
            station_code: "KGX".into(),
            station_name: "London Kings Cross".into(),
        }
        .render()
        .unwrap();

        assert!(html.contains("London Kings Cross"));
        assert!(html.contains(r#"data-station="KGX""#));
    }

    #[test]
    fn escapes_names() {
        let html = IndexTemplate {
            station_code: "HAY".into(),
            station_name: "Hayes & <Harlington>".into(),
        }
        .render()
        .unwrap();

        assert!(!html.contains("<Harlington>"));
    }
}
