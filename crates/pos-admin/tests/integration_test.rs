use live_collections::CollectionHandle;
use pos_admin::auth::{AuthError, AuthState};
use pos_admin::config::AppConfig;
use pos_admin::lifecycle::PosSystem;
use pos_admin::model::PaymentMethod;
use pos_admin::pages::{AddProductOutcome, AddProductPage, SellOutcome, SellPage, SyncEvent};
use pos_admin::ui::{NavigationLog, NotificationLog};

#[tokio::test]
async fn test_register_and_sign_in() {
    let system = PosSystem::new(&AppConfig::default());
    let auth = &system.auth;
    assert_eq!(auth.current(), AuthState::Pending);

    let uid = auth
        .register("Owner@Example.com", "Owner", "hunter22")
        .await
        .unwrap();

    let duplicate = auth.register("owner@example.com", "Copy", "hunter22").await;
    assert!(matches!(duplicate, Err(AuthError::EmailAlreadyInUse(_))));

    let short = auth.register("new@example.com", "New", "abc").await;
    assert!(matches!(short, Err(AuthError::WeakPassword { .. })));

    let wrong = auth.sign_in("owner@example.com", "hunter23").await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    assert_eq!(auth.current(), AuthState::Pending);

    let unknown = auth.sign_in("nobody@example.com", "hunter22").await;
    assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

    let session = auth.sign_in("OWNER@example.com", "hunter22").await.unwrap();
    assert_eq!(session.uid, uid);
    assert_eq!(session.email, "owner@example.com");
    assert_eq!(auth.current(), AuthState::SignedIn(session));

    let operators = auth.list().await.unwrap();
    assert_eq!(operators.len(), 1);
    assert!(operators[0].password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_full_flow_from_catalog_to_sale() {
    let system = PosSystem::new(&AppConfig::default());
    system
        .auth
        .register("clerk@example.com", "Clerk", "secret1")
        .await
        .unwrap();
    system
        .auth
        .sign_in("clerk@example.com", "secret1")
        .await
        .unwrap();
    let services = system.services();

    // The sell page is open before the product exists.
    let sell_log = NotificationLog::new();
    let nav = NavigationLog::new();
    let mut sell = SellPage::mount(&services, sell_log.clone(), nav.clone()).await;
    while sell.is_loading() {
        sell.sync().await;
    }
    assert!(sell.products().is_empty());

    let mut add = AddProductPage::new(&services, NotificationLog::new());
    add.set_name("Lamp");
    add.set_description("Desk lamp");
    add.set_price("24.99");
    let key = match add.submit().await {
        AddProductOutcome::Saved(key) => key,
        other => panic!("expected Saved, got {:?}", other),
    };

    assert_eq!(sell.sync().await, Some(SyncEvent::Products(1)));
    sell.on_search_input("la");
    assert_eq!(sell.dropdown_items().len(), 1);
    assert!(sell.select_product(&key));
    sell.set_phone_number("5551234567");
    sell.set_payment_method(PaymentMethod::Online);

    let sale = match sell.submit().await {
        SellOutcome::Sold(sale) => sale,
        other => panic!("expected Sold, got {:?}", other),
    };
    assert_eq!(sale.product_id, key);
    assert_eq!(sale.price, 24.99);
    assert_eq!(sale.description, "Desk lamp");

    let sales = system.sale_client.list().await.unwrap();
    assert_eq!(sales, vec![sale]);
    assert!(nav.routes().is_empty());

    drop(sell);
    drop(add);
    drop(services);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_two_pages_selling_the_same_product() {
    let system = PosSystem::new(&AppConfig::default());
    system.auth.resolve();
    let services = system.services();

    let mut add = AddProductPage::new(&services, NotificationLog::new());
    add.set_name("Mug");
    add.set_description("Ceramic");
    add.set_price("8");
    let AddProductOutcome::Saved(key) = add.submit().await else {
        panic!("product was not saved");
    };

    let mut pages = Vec::new();
    for _ in 0..2 {
        let mut page = SellPage::mount(&services, NotificationLog::new(), NavigationLog::new()).await;
        while page.is_loading() {
            page.sync().await;
        }
        assert!(page.select_product(&key));
        pages.push(page);
    }

    let pending: Vec<_> = pages
        .iter_mut()
        .map(|page| page.begin_submit().ok().unwrap())
        .collect();
    let mut results = Vec::new();
    for write in pending {
        results.push(write.send().await);
    }
    for (page, result) in pages.iter_mut().zip(results) {
        assert!(matches!(page.finish_submit(result), SellOutcome::Sold(_)));
    }

    let sales = system.sale_client.list().await.unwrap();
    assert_eq!(sales.len(), 2);
    assert_ne!(sales[0].id, sales[1].id);
    assert!(sales.iter().all(|s| s.product_id == key));
}

#[tokio::test]
async fn test_signed_out_visitor_is_redirected() {
    let config = AppConfig::from_lookup(|var| match var {
        "POS_LOGIN_ROUTE" => Some("/sign-in".to_string()),
        _ => None,
    })
    .unwrap();
    let system = PosSystem::new(&config);
    let nav = NavigationLog::new();
    let mut page = SellPage::mount(&system.services(), NotificationLog::new(), nav.clone()).await;

    system.auth.resolve();
    while !page.auth_state().is_signed_out() {
        page.sync().await;
    }
    assert_eq!(nav.routes(), vec!["/sign-in".to_string()]);
}
