use crate::config::RouteSettings;

/// Paths the edge controller handles at all.
///
/// A path is out of scope when the part after its leading `/` starts with one
/// of the excluded prefixes (`/api/...`, `/_next/...`, `/favicon.ico`,
/// `/health`). Out-of-scope requests are neither resolved nor guarded.
#[derive(Debug, Clone)]
pub struct EdgeScope {
    excluded_prefixes: Vec<String>,
}

impl EdgeScope {
    pub fn new(settings: &RouteSettings) -> Self {
        Self {
            excluded_prefixes: settings
                .excluded_prefixes
                .iter()
                .map(|p| p.trim_start_matches('/').to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        self.excluded_prefixes
            .iter()
            .any(|prefix| rest.starts_with(prefix.as_str()))
    }
}
