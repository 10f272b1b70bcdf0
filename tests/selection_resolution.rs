use crux_core::testing::AppTester;
use crux_http::testing::ResponseBuilder;

use taplist_core::model::Category;
use taplist_core::view::{CompactPane, MapView, ViewState};
use taplist_core::{
    App, AppConfig, Effect, Entry, EntryId, Event, Model, ResolutionStatus,
};

fn entry(id: u64, name: &str, latitude: &str, longitude: &str) -> Entry {
    Entry {
        id: EntryId(id),
        name: name.into(),
        category: Category::Micro,
        street: "3301 Madison Rd".into(),
        city: "Cincinnati".into(),
        region: "Ohio".into(),
        postal_code: "45209-1132".into(),
        country: "United States".into(),
        longitude: longitude.into(),
        latitude: latitude.into(),
        phone: "5138368733".into(),
        website_url: "http://example.com".into(),
        last_updated: "2018-08-24T15:44:22.281Z".into(),
        tags: vec!["patio".into()],
    }
}

fn populated(app: &AppTester<App, Effect>, entries: &[Entry], width: u32) -> Model {
    let mut model = Model::default();
    app.update(
        Event::Started {
            config: AppConfig::default(),
            viewport_width: width,
        },
        &mut model,
    );
    app.update(
        Event::SearchSubmitted {
            city: "cincinnati".into(),
            state: "ohio".into(),
        },
        &mut model,
    );
    let body = serde_json::to_vec(entries).unwrap();
    app.update(
        Event::DirectoryResponse(Box::new(Ok(ResponseBuilder::ok().body(body).build()))),
        &mut model,
    );
    model
}

fn geocode_ok(entry_id: EntryId, epoch: u64, lat: f64, lng: f64) -> Event {
    let body = format!(
        r#"{{"results": [{{"geometry": {{"location": {{"lat": {lat}, "lng": {lng}}}}}}}]}}"#
    )
    .into_bytes();
    Event::GeocodeResponse {
        entry_id,
        epoch,
        response: Box::new(Ok(ResponseBuilder::ok().body(body).build())),
    }
}

fn geocode_err(entry_id: EntryId, epoch: u64) -> Event {
    let response = ResponseBuilder::with_status(crux_http::http::StatusCode::BadGateway)
        .body(Vec::new())
        .build();
    Event::GeocodeResponse {
        entry_id,
        epoch,
        response: Box::new(Ok(response)),
    }
}

fn http_request_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Http(_)))
        .count()
}

#[test]
fn embedded_coordinates_resolve_synchronously() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(
        &app,
        &[entry(1, "MadTree Brewing", "39.1563725", "-84.4239715")],
        800,
    );

    let update = app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);

    assert_eq!(
        http_request_count(&update.effects),
        0,
        "the embedded path must not touch the network"
    );
    let resolution = model.resolution.as_ref().unwrap();
    assert_eq!(resolution.status, ResolutionStatus::Resolved);
    assert_eq!(resolution.entry_id, EntryId(1));

    let view = app.view(&model);
    match view.state {
        ViewState::Expanded { detail, .. } => {
            let detail = detail.expect("a selection renders a detail pane");
            assert!(!detail.show_back_control);
            match detail.map {
                MapView::Pin {
                    lat,
                    lng,
                    resolving,
                    ..
                } => {
                    assert!((lat - 39.156_372_5).abs() < f64::EPSILON);
                    assert!((lng - -84.423_971_5).abs() < f64::EPSILON);
                    assert!(!resolving);
                }
                MapView::Unavailable { .. } => panic!("expected a pin"),
            }
        }
        ViewState::Compact { .. } => panic!("expected the expanded layout"),
    }
}

#[test]
fn placeholder_coordinates_trigger_exactly_one_geocode_request() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(&app, &[entry(1, "Rhinegeist", "", "")], 800);

    let update = app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);

    assert_eq!(http_request_count(&update.effects), 1);
    let request = update
        .effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .unwrap();
    assert!(request.operation.url.contains("address="));
    assert!(request.operation.url.contains("Cincinnati"));
    assert_eq!(
        model.resolution.as_ref().unwrap().status,
        ResolutionStatus::Pending
    );

    // Re-activating the same entry is not an identity change: no new request.
    let update = app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);
    assert_eq!(http_request_count(&update.effects), 0);
    assert_eq!(
        model.resolution.as_ref().unwrap().status,
        ResolutionStatus::Pending
    );
}

#[test]
fn geocode_success_commits_the_center() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(&app, &[entry(1, "Rhinegeist", "", "")], 800);
    app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);

    app.update(
        geocode_ok(EntryId(1), model.resolve_epoch, 39.16, -84.42),
        &mut model,
    );

    let resolution = model.resolution.as_ref().unwrap();
    assert_eq!(resolution.status, ResolutionStatus::Resolved);
    assert!((resolution.center.lat() - 39.16).abs() < f64::EPSILON);
    assert!((resolution.center.lng() - -84.42).abs() < f64::EPSILON);
}

#[test]
fn stale_geocode_response_never_overwrites_a_newer_selection() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(
        &app,
        &[entry(1, "Rhinegeist", "", ""), entry(2, "Taft's", "", "")],
        800,
    );

    app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);
    let epoch_a = model.resolve_epoch;

    app.update(Event::EntrySelected { id: EntryId(2) }, &mut model);
    assert_eq!(model.resolution.as_ref().unwrap().entry_id, EntryId(2));

    // Entry 1's response arrives late: it must be dropped on the floor.
    app.update(geocode_ok(EntryId(1), epoch_a, 1.0, 2.0), &mut model);

    let resolution = model.resolution.as_ref().unwrap();
    assert_eq!(resolution.entry_id, EntryId(2));
    assert_eq!(resolution.status, ResolutionStatus::Pending);
    assert!((resolution.center.lat() - 1.0).abs() > f64::EPSILON);

    // Entry 2's own response still lands.
    app.update(
        geocode_ok(EntryId(2), model.resolve_epoch, 39.11, -84.51),
        &mut model,
    );
    let resolution = model.resolution.as_ref().unwrap();
    assert_eq!(resolution.entry_id, EntryId(2));
    assert_eq!(resolution.status, ResolutionStatus::Resolved);
    assert!((resolution.center.lat() - 39.11).abs() < f64::EPSILON);
}

#[test]
fn geocode_failure_keeps_the_held_center_and_flags_the_map() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(&app, &[entry(1, "Rhinegeist", "", "")], 800);
    app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);

    app.update(geocode_err(EntryId(1), model.resolve_epoch), &mut model);

    let resolution = model.resolution.as_ref().unwrap();
    assert_eq!(resolution.status, ResolutionStatus::Failed);
    assert!((resolution.center.lat() - taplist_core::DEFAULT_CENTER_LAT).abs() < f64::EPSILON);

    let view = app.view(&model);
    match view.state {
        ViewState::Expanded { detail, .. } => match detail.unwrap().map {
            MapView::Unavailable { message } => {
                assert_eq!(
                    message,
                    "There was a problem with retrieving location data for this brewery"
                );
            }
            MapView::Pin { .. } => panic!("a failed resolution renders the banner, not a pin"),
        },
        ViewState::Compact { .. } => panic!("expected the expanded layout"),
    }
}

#[test]
fn compact_layout_shows_one_pane_and_back_returns_to_the_list() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(
        &app,
        &[entry(1, "MadTree Brewing", "39.1563725", "-84.4239715")],
        400,
    );

    let view = app.view(&model);
    assert!(matches!(
        view.state,
        ViewState::Compact {
            pane: CompactPane::List { .. }
        }
    ));

    app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);
    let view = app.view(&model);
    match view.state {
        ViewState::Compact {
            pane: CompactPane::Detail { detail },
        } => assert!(detail.show_back_control),
        _ => panic!("a compact selection shows the detail pane alone"),
    }

    let update = app.update(Event::BackPressed, &mut model);
    assert!(update
        .effects
        .iter()
        .any(|effect| matches!(effect, Effect::Render(_))));
    assert!(model.selection.is_none());
    assert!(model.resolution.is_none());
    let view = app.view(&model);
    assert!(matches!(
        view.state,
        ViewState::Compact {
            pane: CompactPane::List { .. }
        }
    ));
}

#[test]
fn back_without_a_selection_is_a_no_op() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(&app, &[entry(1, "MadTree Brewing", "", "")], 400);

    let update = app.update(Event::BackPressed, &mut model);
    assert!(update.effects.is_empty());
}

#[test]
fn resize_only_announces_breakpoint_crossings() {
    let app = AppTester::<App, Effect>::default();
    let mut model = populated(
        &app,
        &[entry(1, "MadTree Brewing", "39.1563725", "-84.4239715")],
        800,
    );
    app.update(Event::EntrySelected { id: EntryId(1) }, &mut model);

    // 800 → 400 crosses the breakpoint: single-pane detail with back control.
    let update = app.update(Event::ViewportResized { width: 400 }, &mut model);
    assert!(update
        .effects
        .iter()
        .any(|effect| matches!(effect, Effect::Render(_))));
    match app.view(&model).state {
        ViewState::Compact {
            pane: CompactPane::Detail { detail },
        } => assert!(detail.show_back_control),
        _ => panic!("crossing below the breakpoint switches to compact detail"),
    }

    // 400 → 800 crosses back.
    let update = app.update(Event::ViewportResized { width: 800 }, &mut model);
    assert!(update
        .effects
        .iter()
        .any(|effect| matches!(effect, Effect::Render(_))));

    // 800 → 700 stays on the same side: no state change, no render.
    let update = app.update(Event::ViewportResized { width: 700 }, &mut model);
    assert!(update.effects.is_empty());
}
