#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventInit, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use portfolio_site::config::{SiteConfig, ToastTimings};
use portfolio_site::toast::{Notice, Severity};
use portfolio_site::schedule::Scheduler;
use portfolio_site::wasm::{self, dom, form, nav, render, reveal, scroll, timer::BrowserScheduler, toast};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn fixture(html: &str) -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn set_hash(hash: &str) {
    web_sys::window().unwrap().location().set_hash(hash).unwrap();
}

fn click(root: &Element, selector: &str) {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .unchecked_into::<HtmlElement>()
        .click();
}

/// Ids (or `data-page`s) of the elements under `root` matching `selector`
/// that carry the active class.
fn active(root: &Element, selector: &str) -> Vec<String> {
    dom::query_within(root, &format!("{selector}.active"))
        .unwrap()
        .iter()
        .map(|el| el.get_attribute("data-page").unwrap_or_else(|| el.id()))
        .collect()
}

const NAV_PAGE: &str = r##"
    <a class="nav-brand" href="#home">Brand</a>
    <a class="nav-link" href="#home" data-page="home">Home</a>
    <a class="nav-link" href="#about" data-page="about">About</a>
    <button class="nav-mobile-btn"><i class="fas fa-bars"></i></button>
    <nav class="nav-mobile">
      <a class="nav-link" id="mobile-about" href="#about" data-page="about">About</a>
    </nav>
    <section id="home" class="page"></section>
    <section id="about" class="page"></section>
"##;

fn transform_of(element: &Element) -> String {
    element
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("transform")
        .unwrap()
}

#[wasm_bindgen_test(async)]
async fn toast_slides_in_and_is_removed() {
    let doc = document();
    let scheduler = BrowserScheduler::new(web_sys::window().unwrap());
    let timings = ToastTimings {
        enter_delay_ms: 20,
        hold_ms: 100,
        transition_ms: 20,
    };
    toast::present(&doc, &scheduler, &timings, &Notice::info("hello")).unwrap();

    let el = doc.query_selector(".notification-info").unwrap().expect("toast inserted");
    assert_eq!(el.text_content().as_deref(), Some("hello"));
    assert_eq!(transform_of(&el), "translateX(100%)");

    sleep(60).await;
    // Browsers serialise the zero offset as `0px`.
    assert!(transform_of(&el).starts_with("translateX(0"));

    sleep(200).await;
    assert!(el.parent_node().is_none());
}

#[wasm_bindgen_test(async)]
async fn contact_form_logs_notifies_and_resets() {
    let root = fixture(
        r#"<form id="contactForm">
             <input name="name"><input name="email"><input name="subject">
             <textarea name="message"></textarea>
           </form>"#,
    );
    let doc = document();
    let input = |name: &str| -> HtmlInputElement {
        root.query_selector(&format!("[name={name}]"))
            .unwrap()
            .unwrap()
            .unchecked_into()
    };
    input("name").set_value("Jane");
    input("email").set_value("j@x.com");
    input("subject").set_value("Hi");
    let message: HtmlTextAreaElement = root
        .query_selector("textarea")
        .unwrap()
        .unwrap()
        .unchecked_into();
    message.set_value("Hello");

    let scheduler = Rc::new(BrowserScheduler::new(web_sys::window().unwrap()));
    form::install(&doc, Rc::new(SiteConfig::default()), scheduler).unwrap();

    let init = EventInit::new();
    init.set_cancelable(true);
    let submit = Event::new_with_event_init_dict("submit", &init).unwrap();
    let form_el = doc.get_element_by_id("contactForm").unwrap();
    // `false` means the handler called preventDefault.
    assert!(!form_el.dispatch_event(&submit).unwrap());

    assert_eq!(input("name").value(), "");
    assert_eq!(input("email").value(), "");
    assert_eq!(input("subject").value(), "");
    assert_eq!(message.value(), "");
    let class = format!(".notification-{}", Severity::Success.as_str());
    assert!(doc.query_selector(&class).unwrap().is_some());

    root.remove();
}

#[wasm_bindgen_test]
fn blur_clears_the_focus_glow() {
    let root = fixture(r#"<form id="contactForm"><input name="name"></form>"#);
    let doc = document();
    let scheduler = Rc::new(BrowserScheduler::new(web_sys::window().unwrap()));
    form::install(&doc, Rc::new(SiteConfig::default()), scheduler).unwrap();

    let field: HtmlElement = root.query_selector("input").unwrap().unwrap().unchecked_into();
    field.dispatch_event(&Event::new("focus").unwrap()).unwrap();
    assert_ne!(field.style().get_property_value("box-shadow").unwrap(), "none");
    field.dispatch_event(&Event::new("blur").unwrap()).unwrap();
    assert_eq!(field.style().get_property_value("box-shadow").unwrap(), "none");

    root.remove();
}

#[wasm_bindgen_test]
fn injected_style_lands_in_head() {
    let doc = document();
    dom::inject_style(&doc, ".injected-marker { color: red; }").unwrap();
    let styles = dom::query_all(&doc, "head style").unwrap();
    assert!(styles
        .iter()
        .any(|s| s.text_content().unwrap_or_default().contains(".injected-marker")));
}

#[wasm_bindgen_test(async)]
async fn hash_changes_switch_exactly_one_page() {
    set_hash("");
    let root = fixture(NAV_PAGE);
    let window = web_sys::window().unwrap();
    let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
    nav::install(&window, &document(), Rc::new(SiteConfig::default()), scheduler).unwrap();

    assert_eq!(active(&root, ".page"), ["home"]);
    assert_eq!(active(&root, ".nav-link"), ["home"]);

    set_hash("about");
    sleep(50).await;
    assert_eq!(active(&root, ".page"), ["about"]);
    assert_eq!(active(&root, ".nav-link"), ["about"]);

    set_hash("nowhere");
    sleep(50).await;
    assert_eq!(active(&root, ".page"), ["home"]);

    root.remove();
}

#[wasm_bindgen_test(async)]
async fn mobile_menu_toggles_icon_and_closes_on_link_click() {
    set_hash("");
    let root = fixture(NAV_PAGE);
    let window = web_sys::window().unwrap();
    let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
    nav::install(&window, &document(), Rc::new(SiteConfig::default()), scheduler).unwrap();

    let icon = root.query_selector(".nav-mobile-btn i").unwrap().unwrap();
    let panel = root.query_selector(".nav-mobile").unwrap().unwrap();

    click(&root, ".nav-mobile-btn");
    assert_eq!(icon.class_name(), "fas fa-times");
    assert!(panel.class_list().contains("active"));
    click(&root, ".nav-mobile-btn");
    assert_eq!(icon.class_name(), "fas fa-bars");
    assert!(!panel.class_list().contains("active"));

    click(&root, ".nav-mobile-btn");
    click(&root, "#mobile-about");
    assert_eq!(icon.class_name(), "fas fa-bars");
    assert!(!panel.class_list().contains("active"));
    sleep(50).await;
    assert_eq!(active(&root, ".page"), ["about"]);

    root.remove();
}

#[wasm_bindgen_test(async)]
async fn brand_link_returns_home() {
    set_hash("about");
    let root = fixture(NAV_PAGE);
    let window = web_sys::window().unwrap();
    let doc = document();
    let config = Rc::new(SiteConfig::default());
    let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
    nav::install(&window, &doc, Rc::clone(&config), scheduler).unwrap();
    scroll::install(&window, &doc, &config).unwrap();
    assert_eq!(active(&root, ".page"), ["about"]);

    click(&root, ".nav-brand");
    sleep(50).await;
    assert_eq!(active(&root, ".page"), ["home"]);

    root.remove();
}

#[wasm_bindgen_test(async)]
async fn revealed_cards_stay_revealed() {
    let root = fixture(
        r#"<div id="near" class="skill-card project-card" style="position:absolute;top:0;height:100px"></div>
           <div id="far" class="info-item" style="position:absolute;top:5000px;height:100px"></div>"#,
    );
    let options = SiteConfig::default().reveal;
    reveal::install(&document(), &options).unwrap();
    sleep(200).await;

    let near: HtmlElement = root.query_selector("#near").unwrap().unwrap().unchecked_into();
    let far = root.query_selector("#far").unwrap().unwrap();
    assert!(near.class_list().contains(options.marker_class));
    assert!(!far.class_list().contains(options.marker_class));

    // Scrolled out again: the marker stays.
    near.style().set_property("top", "6000px").unwrap();
    sleep(200).await;
    assert!(near.class_list().contains(options.marker_class));

    root.remove();
}

#[wasm_bindgen_test(async)]
async fn scene_stops_after_teardown() {
    let root = fixture(r#"<canvas id="scene3d" style="width:200px;height:100px"></canvas>"#);
    let window = web_sys::window().unwrap();
    let handle = match render::start(&window, &document(), &SiteConfig::default()) {
        Ok(Some(handle)) => handle,
        Ok(None) => panic!("canvas not found"),
        // Headless browsers without WebGL2 cannot run the scene at all.
        Err(_) => {
            root.remove();
            return;
        }
    };

    sleep(150).await;
    assert!(handle.is_running());
    assert!(handle.frames() > 0);

    handle.teardown();
    let frames = handle.frames();
    sleep(150).await;
    assert!(!handle.is_running());
    assert_eq!(handle.frames(), frames);

    root.remove();
}

#[wasm_bindgen_test(async)]
async fn cancelled_timers_release_their_callbacks() {
    let scheduler = BrowserScheduler::new(web_sys::window().unwrap());
    let ran = Rc::new(Cell::new(0));

    let counter = Rc::clone(&ran);
    let handle = scheduler
        .schedule(20, Box::new(move || counter.set(counter.get() + 1)))
        .unwrap();
    assert_eq!(scheduler.retained(), 1);
    scheduler.cancel(handle);
    assert_eq!(scheduler.retained(), 0);

    let counter = Rc::clone(&ran);
    scheduler
        .schedule(10, Box::new(move || counter.set(counter.get() + 1)))
        .unwrap();
    sleep(60).await;
    assert_eq!(ran.get(), 1);

    // The finished callback is dropped on the next call.
    let later = scheduler.schedule(1000, Box::new(|| {})).unwrap();
    assert_eq!(scheduler.retained(), 1);
    scheduler.cancel(later);
    assert_eq!(scheduler.retained(), 0);
}

#[wasm_bindgen_test]
fn boot_survives_a_document_without_head() {
    let window = web_sys::window().unwrap();
    let bare = Document::new().unwrap();
    assert!(bare.head().is_none());
    wasm::boot(&window, &bare, Rc::new(SiteConfig::default())).unwrap();
}
