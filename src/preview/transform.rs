//! Text passes applied around transpilation.
//!
//! Order matters and is fixed:
//! 1. [`fix_void_tags`] and 2. [`strip_export_trailer`] run on the source
//!    before it reaches the transpiler ([`normalize_source`]).
//! 3. Transpilation (runtime capability, not here).
//! 4. [`strip_imports`] and 5. [`rewrite_default_export`] run on transpiled
//!    output ([`prepare_script`]).

use regex::Regex;
use std::sync::OnceLock;

/// Global slot the rewritten script assigns its default export to
pub const COMPONENT_SLOT: &str = "__previewComponent";

struct Passes {
    br: Regex,
    hr: Regex,
    export_trailer: Regex,
    import: Regex,
    export_default: Regex,
}

fn passes() -> &'static Passes {
    static PASSES: OnceLock<Passes> = OnceLock::new();
    PASSES.get_or_init(|| Passes {
        br: Regex::new(r"(?i)<br\s*>").expect("br regex"),
        hr: Regex::new(r"(?i)<hr\s*>").expect("hr regex"),
        export_trailer: Regex::new(r"(?m)^\s*export\s+default\s+\w+\s*;\s*$")
            .expect("export trailer regex"),
        import: Regex::new(r"(?m)^import\s+.*?;?\s*$").expect("import regex"),
        export_default: Regex::new(r"export\s+default\s+").expect("export default regex"),
    })
}

/// Rewrite `<br>` and `<hr>` (any case, optional whitespace) to self-closing form
pub fn fix_void_tags(source: &str) -> String {
    let p = passes();
    let source = p.br.replace_all(source, "<br />");
    p.hr.replace_all(&source, "<hr />").into_owned()
}

/// Remove standalone `export default Name;` lines
pub fn strip_export_trailer(source: &str) -> String {
    passes().export_trailer.replace_all(source, "").into_owned()
}

/// Remove import declarations; the surface provides its libraries globally
pub fn strip_imports(script: &str) -> String {
    passes().import.replace_all(script, "").into_owned()
}

/// Turn `export default <expr>` into an assignment to the component slot
pub fn rewrite_default_export(script: &str) -> String {
    let assignment = format!("window.{} = ", COMPONENT_SLOT);
    passes()
        .export_default
        .replace_all(script, assignment.as_str())
        .into_owned()
}

/// Passes applied before transpilation
pub fn normalize_source(source: &str) -> String {
    strip_export_trailer(&fix_void_tags(source))
}

/// Passes applied to transpiled output before execution
pub fn prepare_script(transpiled: &str) -> String {
    rewrite_default_export(&strip_imports(transpiled))
}
