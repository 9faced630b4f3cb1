//! A full page session against the in-memory adapters.

use std::rc::Rc;

use futures::executor::block_on;
use techstore_cache::{Cache, KvBackend, MemoryBackend};
use techstore_commerce::ProductId;
use techstore_data::{FetchClient, MockTransport};
use techstore_observability::{LogLevel, MemorySink, StructuredLogger};
use techstore_ui::prelude::*;
use techstore_ui::{MemoryElement, SubscribeOutcome, UserListOutcome};

struct Session {
    doc: Rc<MemoryDocument>,
    scheduler: Rc<VirtualScheduler>,
    backend: Rc<MemoryBackend>,
    transport: Rc<MockTransport>,
    sink: Rc<MemorySink>,
    storefront: Storefront,
}

fn page() -> Rc<MemoryDocument> {
    Rc::new(
        MemoryDocument::new()
            .with_element("cart-badge", MemoryElement::new("span"))
            .with_input("newsletter-email", "")
            .with_element("userListModal", MemoryElement::new("div"))
            .with_element("userListContent", MemoryElement::new("div")),
    )
}

fn open(doc: Rc<MemoryDocument>, backend: Rc<MemoryBackend>, transport: MockTransport) -> Session {
    let scheduler = Rc::new(VirtualScheduler::new());
    let transport = Rc::new(transport);
    let sink = Rc::new(MemorySink::new());
    let storefront = Storefront::new(
        StorefrontConfig::default(),
        Adapters {
            document: doc.clone(),
            scheduler: scheduler.clone(),
            cache: Cache::from_shared(backend.clone()),
            client: FetchClient::from_shared(transport.clone()),
            share: Rc::new(RecordingShareTarget::clipboard_only()),
            logger: StructuredLogger::new("storefront").with_sink(sink.clone()),
        },
    );
    Session {
        doc,
        scheduler,
        backend,
        transport,
        sink,
        storefront,
    }
}

#[test]
fn cart_survives_a_reload() {
    let backend = Rc::new(MemoryBackend::new());

    let first = open(page(), backend.clone(), MockTransport::new());
    first.storefront.bootstrap();
    first.storefront.add_to_cart(ProductId::new(1)).unwrap();
    first.storefront.add_to_cart(ProductId::new(1)).unwrap();
    first.storefront.add_to_cart(ProductId::new(2)).unwrap();
    first.storefront.add_to_cart(ProductId::new(999)).unwrap();

    assert_eq!(
        first.backend.get_raw("cart").unwrap().as_deref(),
        Some(
            r#"[{"id":1,"name":"Wireless Headphones","price":99.99,"quantity":2},{"id":2,"name":"Smart Watch","price":199.99,"quantity":1}]"#
        )
    );

    let second = open(page(), backend, MockTransport::new());
    let state = second.storefront.bootstrap();

    assert_eq!(state.total_items, 3);
    assert_eq!(second.doc.element("cart-badge").unwrap().text, "3");
    assert_eq!(second.storefront.cart().lines().len(), 2);
}

#[test]
fn notifications_clear_themselves() {
    let s = open(page(), Rc::new(MemoryBackend::new()), MockTransport::new());

    s.storefront.add_to_cart(ProductId::new(3)).unwrap();
    s.scheduler.advance(1500);
    s.storefront.add_to_wishlist(ProductId::new(3));
    assert_eq!(s.doc.body_children().len(), 2);

    s.scheduler.advance(1500);
    assert_eq!(s.doc.body_children().len(), 1);
    s.scheduler.advance(1500);
    assert!(s.doc.body_children().is_empty());
}

#[test]
fn newsletter_then_user_list() {
    let s = open(
        page(),
        Rc::new(MemoryBackend::new()),
        MockTransport::new().respond_with(
            200,
            r#"[{"name":"Grace","email":"grace@example.com","created_at":"2024-03-09T08:00:00"}]"#,
        ),
    );

    assert!(matches!(
        s.storefront.subscribe_newsletter(),
        SubscribeOutcome::Rejected(_)
    ));
    s.doc.set_input_value("newsletter-email", "grace@example.com");
    assert!(matches!(
        s.storefront.subscribe_newsletter(),
        SubscribeOutcome::Subscribed(_)
    ));

    assert_eq!(
        block_on(s.storefront.show_user_list()),
        UserListOutcome::Loaded(1)
    );
    let content = s.doc.element("userListContent").unwrap().inner_html;
    assert!(content.contains("grace@example.com"));
    assert!(content.contains("Joined: 3/9/2024"));
    assert_eq!(s.transport.requests()[0].url(), "/api/users");
}

#[test]
fn unauthorized_user_list_is_logged() {
    let s = open(
        page(),
        Rc::new(MemoryBackend::new()),
        MockTransport::new().respond_with(401, r#"{"error":"Not logged in"}"#),
    );

    assert_eq!(
        block_on(s.storefront.show_user_list()),
        UserListOutcome::Failed
    );
    let errors: Vec<_> = s
        .sink
        .entries()
        .into_iter()
        .filter(|e| e.level == LogLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].component, "users");
}

#[test]
fn theme_is_restored_on_next_load() {
    let backend = Rc::new(MemoryBackend::new());

    let first = open(page(), backend.clone(), MockTransport::new());
    assert_eq!(first.storefront.toggle_theme().unwrap(), Theme::Dark);

    let second = open(page(), backend, MockTransport::new());
    assert_eq!(second.storefront.bootstrap().theme, Theme::Dark);
    assert!(second.doc.body_has_class("dark-theme"));
}
