//! HTML document loaded into a preview tab.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const REACT_URL: &str = "https://unpkg.com/react@18/umd/react.development.js";
pub const REACT_DOM_URL: &str = "https://unpkg.com/react-dom@18/umd/react-dom.development.js";
pub const BABEL_URL: &str = "https://unpkg.com/@babel/standalone/babel.min.js";
pub const TAILWIND_URL: &str = "https://cdn.tailwindcss.com";

/// Script that installs the `window.__sitelift` bridge used by `ChromeRuntime`
pub const BRIDGE_SCRIPT: &str = include_str!("surface.js");

/// Build the surface document. The frame is `width` CSS pixels wide.
pub fn surface_html(width: u32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Preview</title>
<script src="{tailwind}"></script>
<style>
  body {{ margin: 0; background: #fff; color: #111827; }}
  #preview-frame {{
    width: {width}px; max-width: 100%; min-height: 200px;
    padding: 1rem; box-sizing: border-box;
  }}
  #preview-error {{
    display: none; color: #dc2626; background: #fef2f2;
    font-size: 0.875rem; padding: 1rem; border-radius: 0.25rem;
  }}
</style>
</head>
<body>
<div id="preview-frame">
  <div id="preview-error" role="alert"></div>
  <div id="preview-root"></div>
</div>
<script>{bridge}</script>
<script crossorigin="anonymous" src="{react}"></script>
<script crossorigin="anonymous" src="{react_dom}"></script>
<script crossorigin="anonymous" src="{babel}"></script>
</body>
</html>
"#,
        tailwind = TAILWIND_URL,
        width = width,
        bridge = BRIDGE_SCRIPT,
        react = REACT_URL,
        react_dom = REACT_DOM_URL,
        babel = BABEL_URL,
    )
}

/// The surface document as a navigable `data:` URL
pub fn surface_data_url(width: u32) -> String {
    format!("data:text/html;base64,{}", STANDARD.encode(surface_html(width)))
}
