//! Server constants

/// Internal route the edge fairing rewrites redirected requests to
pub const EDGE_REDIRECT_PATH: &str = "/__edge/redirect";

/// App shell file inside the static directory
pub const APP_SHELL_FILE: &str = "index.html";

/// Rank of the static file server
pub const STATIC_FILES_RANK: isize = 10;

/// Shell served when the static directory has no `index.html`
pub const FALLBACK_APP_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Dashboard</title></head>
<body><div id="root"></div></body>
</html>
"#;
