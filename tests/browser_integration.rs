use sitelift::preview::{PreviewConfig, PreviewLink, SurfaceId, SurfaceState, SystemClock};
use sitelift::{BrowserSession, LaunchOptions, Viewport, segment};

fn launch() -> BrowserSession {
    BrowserSession::launch(LaunchOptions::new().headless(true))
        .expect("Failed to launch browser")
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_rendered_dom_segments_like_source() {
    let session = launch();

    let body = format!(
        "<header><h1>Welcome</h1><p>{}</p></header>\
         <section><h2>Pricing Plans</h2><p>{}</p></section>",
        "Fast and simple. ".repeat(6),
        "Pick the plan that suits you. ".repeat(4)
    );
    session
        .navigate(&format!("data:text/html,<html><body>{}</body></html>", body))
        .expect("Failed to navigate");

    let html = session.tab().get_content().expect("Failed to read content");
    let labels: Vec<String> = segment(&html).into_iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["Header", "Pricing"]);
}

#[test]
#[ignore]
fn test_chrome_surface_handshake() {
    let session = launch();
    let runtime = session
        .open_preview(Viewport::Desktop)
        .expect("Failed to open preview tab");

    let mut link =
        PreviewLink::new(SurfaceId(1), runtime, PreviewConfig::default(), SystemClock);
    link.send_code("export default function Foo(){ return <div>Hi</div>; }");
    link.load();

    assert_eq!(link.settle(), SurfaceState::Rendered);
    assert!(link.deliveries().iter().any(|d| d.message.is_ready()));

    // the surface stays usable after a code error
    link.send_code("export default function Bad(){ return <div>; }");
    assert_eq!(link.settle(), SurfaceState::Errored);
    let shown = link.surface().runtime().error_text().expect("error text");
    assert!(shown.is_some_and(|text| text.starts_with("Preview error: ")));

    link.send_code("function Hero() { return <section>Welcome</section>; }");
    assert_eq!(link.settle(), SurfaceState::Rendered);
}

#[test]
#[ignore]
fn test_mobile_preview_screenshot() {
    let session = launch();
    let report = session
        .render_preview(
            "export default function Card() { return <div className=\"p-4\">Card<br></div>; }",
            Viewport::Mobile,
            PreviewConfig::default(),
        )
        .expect("preview");

    assert!(report.rendered(), "{:?}", report.error);
    assert!(report.screenshot.starts_with(&[0x89, b'P', b'N', b'G']));
}
