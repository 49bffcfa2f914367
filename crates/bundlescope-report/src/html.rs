//! Self-contained `stats.html` report.

use crate::svg::escape_xml;

const STYLE: &str = r#"
html, body { margin: 0; height: 100%; background: #111; color: #fff; font-family: Helvetica, Arial, sans-serif; }
.chart { display: block; width: 100%; height: calc(100% - 4rem); }
.chart path { stroke-linecap: butt; }
.bottom { display: flex; justify-content: space-between; align-items: center; height: 4rem; padding: 0 1.5rem; }
.bottom__title { font-size: 1.1rem; }
.bottom__size { opacity: 0.8; }
"#;

/// Make serialized JSON safe to place inside an inline `<script>`.
pub fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Assemble the report page.
///
/// `graph_json` is exposed to scripts as `window.__GRAPH__`.
pub fn build_template(graph_json: &str, svg: &str, title: &str, size_label: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<script>window.__GRAPH__ = {graph}</script>
{svg}<div class="bottom">
  <div class="bottom__title">{title}</div>
  <div class="bottom__size">{size_label}</div>
</div>
</body>
</html>
"#,
        title = escape_xml(title),
        style = STYLE,
        graph = escape_script(graph_json),
        svg = svg,
        size_label = escape_xml(size_label),
    )
}
