//! Example: build one of each widget and print the markup

use anyhow::Context;
use bootstrap_manager::dom::Document;
use bootstrap_manager::html::HtmlSerializer;
use bootstrap_manager::{
    BootstrapManager, CarouselItem, CarouselOptions, HostScope, ModalOptions, ModalSize, TabItem, TabsOptions,
    Target,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut doc = Document::new("https://example.com/");
    let body = doc.body().context("document has no body")?;
    let region = doc.tree_mut().create_element("main");
    doc.tree_mut().set_attribute(region, "id", "app")?;
    doc.tree_mut().append_child(body, region)?;

    let mut scope = HostScope::new();
    BootstrapManager::headless().register(&mut scope);
    let manager = scope.manager().context("manager not registered")?;

    let mut modal = manager.create_modal(
        &mut doc,
        ModalOptions::default()
            .title("Welcome")
            .body("<p>Built without a browser.</p>")
            .size(ModalSize::Large)
            .centered(true),
    );
    modal.show(&mut doc);

    manager
        .create_tabs(
            &mut doc,
            TabsOptions::default()
                .tabs(vec![
                    TabItem::new("Home", "<p>Home pane</p>"),
                    TabItem::new("Profile", "<p>Profile pane</p>").active(true),
                ])
                .target(Target::from("app")),
        )
        .context("tab group was not built")?;

    let mut carousel = manager.create_carousel(
        &mut doc,
        CarouselOptions::default().interval(3000u32).items(vec![
            CarouselItem::new(r#"<img src="first.png" class="d-block w-100" alt="First">"#).caption("<h5>First</h5>"),
            CarouselItem::new(r#"<img src="second.png" class="d-block w-100" alt="Second">"#),
        ]),
    );
    carousel.next(&mut doc);

    let html = doc.document_element().context("document has no root element")?;
    println!("{}", HtmlSerializer::pretty().serialize_outer(doc.tree(), html));

    if let Some(element) = carousel.element {
        println!("{}", HtmlSerializer::pretty().serialize_outer(doc.tree(), element));
    }
    Ok(())
}
