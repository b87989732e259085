//! Client ↔ server round trips over a real socket

use image::{Rgba, RgbaImage};
use rust_decimal::Decimal;
use shared::{ErrorCode, ImageSize, PixelPoint, Ticket, VenueMap, Zone};
use venue_client::{ClientConfig, ClientError, VenueMapClient};
use venue_server::{Config, ServerState, build_app};
use zone_map::upload::encode_png;
use zone_map::{
    EditorOptions, ImageUpload, RasterOverlay, StoreError, SurfacePoint, SurfaceSize,
    VenueMapStore, ZoneEditor, ZoneSelector,
};

async fn spawn_server() -> (VenueMapClient, ServerState) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let state = ServerState::new(Config::with_overrides(0));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = VenueMapClient::new(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    (client, state)
}

fn editor(client: VenueMapClient) -> ZoneEditor<RasterOverlay, VenueMapClient> {
    let (overlay, events) = RasterOverlay::new();
    ZoneEditor::new("e1", overlay, events, client).with_options(EditorOptions {
        surface: SurfaceSize::new(1000, 500),
        ..EditorOptions::default()
    })
}

fn plan_png() -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(1000, 500, Rgba([250, 250, 250, 255]))).unwrap()
}

#[tokio::test]
async fn authored_map_reaches_the_buyer() {
    let (client, state) = spawn_server().await;
    state.set_tickets(
        "e1",
        vec![
            Ticket::new("t1", "Standing", Decimal::new(2500, 2)),
            Ticket::new("t2", "Balcony", Decimal::new(4000, 2)),
        ],
    );

    // organizer
    let mut editor = editor(client.clone());
    assert!(!editor.open().await.unwrap());
    editor.on_image_uploaded(ImageUpload::new(plan_png())).unwrap();
    let stalls = editor
        .on_zone_drawn(&[
            PixelPoint::new(100.0, 100.0),
            PixelPoint::new(300.0, 100.0),
            PixelPoint::new(300.0, 200.0),
            PixelPoint::new(100.0, 200.0),
        ])
        .unwrap();
    editor.bind_ticket(&stalls, Some("t1")).unwrap();
    let unsold = editor
        .on_zone_drawn(&[
            PixelPoint::new(600.0, 300.0),
            PixelPoint::new(900.0, 300.0),
            PixelPoint::new(750.0, 450.0),
        ])
        .unwrap();
    let stored = editor.save().await.unwrap();
    assert!(!editor.is_dirty());
    assert_eq!(&stored, editor.map());

    let fetched = client.fetch_venue_map("e1").await.unwrap().unwrap();
    assert_eq!(&fetched, editor.map());

    // a second editor session picks the document up again
    let mut reopened = self::editor(client.clone());
    assert!(reopened.open().await.unwrap());
    assert_eq!(reopened.map(), editor.map());

    // buyer
    let catalog = client.fetch_catalog("e1").await.unwrap();
    let (overlay, events) = RasterOverlay::new();
    let mut selector = ZoneSelector::new(overlay, events).with_surface(SurfaceSize::new(1000, 500));
    assert_eq!(selector.load(Some(&fetched), &catalog).unwrap(), 1);
    assert!(!selector.is_available(&unsold));

    selector.renderer_mut().click(SurfacePoint::new(200.0, 150.0));
    let picked = selector.drain_pending();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].zone.id, stalls);
    assert_eq!(picked[0].ticket.price, Decimal::new(2500, 2));
}

#[tokio::test]
async fn server_rejection_keeps_its_code() {
    let (client, state) = spawn_server().await;
    let empty = VenueMap::new("https://cdn.example.com/plan.png", ImageSize::new(10, 10).unwrap());

    let err = client.save_venue_map("e1", &empty).await.unwrap_err();
    assert!(
        matches!(err, ClientError::Api { code: ErrorCode::NoZones, .. }),
        "got {err:?}"
    );

    let err = VenueMapStore::save(&client, "e1", &empty).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Rejected { code: ErrorCode::NoZones, .. }),
        "got {err:?}"
    );
    assert_eq!(state.venue_map_count(), 0);
}

#[tokio::test]
async fn health_and_delete() {
    let (client, state) = spawn_server().await;
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.version.is_some());

    let mut map = VenueMap::new("https://cdn.example.com/plan.png", ImageSize::new(10, 10).unwrap());
    map.zones.push(Zone::new(
        "z1",
        "Stalls",
        "#3366FF",
        vec![
            shared::NormalizedPoint::new(0.1, 0.1),
            shared::NormalizedPoint::new(0.5, 0.1),
            shared::NormalizedPoint::new(0.3, 0.4),
        ],
    ));
    client.save_venue_map("e1", &map).await.unwrap();
    assert_eq!(state.venue_map_count(), 1);

    assert!(client.delete_venue_map("e1").await.unwrap());
    assert!(!client.delete_venue_map("e1").await.unwrap());
    assert!(client.fetch_venue_map("e1").await.unwrap().is_none());
    assert!(client.fetch_tickets("e1").await.unwrap().is_empty());
}

#[tokio::test]
async fn event_ids_needing_escapes_stay_one_segment() {
    let (client, state) = spawn_server().await;
    let mut map = VenueMap::new("https://cdn.example.com/plan.png", ImageSize::new(10, 10).unwrap());
    map.zones.push(Zone::new(
        "z1",
        "Stalls",
        "#3366FF",
        vec![
            shared::NormalizedPoint::new(0.1, 0.1),
            shared::NormalizedPoint::new(0.5, 0.1),
            shared::NormalizedPoint::new(0.3, 0.4),
        ],
    ));

    for event_id in ["summer/2026", "a?b", "a#b", "50%off", "two words"] {
        assert!(
            client.fetch_venue_map(event_id).await.unwrap().is_none(),
            "{event_id}"
        );
        client.save_venue_map(event_id, &map).await.unwrap();
        assert_eq!(state.venue_map(event_id), Some(map.clone()), "{event_id}");
        assert_eq!(client.fetch_venue_map(event_id).await.unwrap(), Some(map.clone()));

        state.set_tickets(event_id, vec![Ticket::new("t1", "Standing", Decimal::new(10, 0))]);
        assert_eq!(client.fetch_tickets(event_id).await.unwrap().len(), 1);

        assert!(client.delete_venue_map(event_id).await.unwrap());
    }
    assert!(state.venue_map("summer").is_none());
}
