//! The application itself: event handling, effect requests, view projection.

use tracing::{debug, warn};
use url::Url;

use crate::capabilities::Capabilities;
use crate::event::{Event, HttpResult};
use crate::model::{
    AppConfig, Coordinate, Entry, EntryId, Model, ResolutionState, ResolutionStatus,
    SearchLocation, ViewMode,
};
use crate::view::{
    self, Banner, CompactPane, EntryDetail, EntryListItem, ListPane, MapView, ViewModel, ViewState,
};
use crate::{resolver, states, AppError, ErrorKind, DEFAULT_MAP_ZOOM};

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), "update");

        match event {
            Event::Started {
                config,
                viewport_width,
            } => {
                model.config = config;
                model.view_mode = ViewMode::for_width(viewport_width);
                // A model restored with a selection still needs a coordinate.
                if model.selection.is_some() {
                    Self::begin_resolution(model, caps);
                }
                caps.render.render();
            }

            Event::SearchSubmitted { city, state } => {
                match Self::directory_url(&model.config, &city, &state) {
                    Ok(url) => {
                        model.search = Some(SearchLocation { city, state });
                        model.entries.clear();
                        model.filter.reset(0);
                        model.selection = None;
                        model.resolution = None;
                        // Orphans any geocoding request for the old list.
                        model.resolve_epoch += 1;
                        model.list_error = None;
                        model.is_loading = true;

                        debug!(url = %url, "issuing directory query");
                        caps.http
                            .get(&url)
                            .send(|response| Event::DirectoryResponse(Box::new(response)));
                    }
                    Err(error) => {
                        warn!(%error, "rejected directory query");
                        model.list_error = Some(error);
                    }
                }
                caps.render.render();
            }

            Event::DirectoryResponse(response) => {
                model.is_loading = false;
                match Self::decode_entries(*response) {
                    Ok(entries) => {
                        debug!(count = entries.len(), "directory query succeeded");
                        model.filter.reset(entries.len());
                        model.entries = entries;
                        model.list_error = None;
                    }
                    Err(error) => {
                        warn!(%error, "directory query failed");
                        model.entries.clear();
                        model.filter.reset(0);
                        model.list_error = Some(error);
                    }
                }
                caps.render.render();
            }

            Event::FilterChanged { text } => {
                model.filter.apply(&text, &model.entries);
                caps.render.render();
            }

            Event::EntrySelected { id } => {
                // Re-activating the current selection is not an identity
                // change and must not re-trigger resolution.
                if model.selection == Some(id) {
                    return;
                }
                if model.entry(id).is_none() {
                    warn!(%id, "selection for unknown entry ignored");
                    return;
                }
                model.selection = Some(id);
                Self::begin_resolution(model, caps);
                caps.render.render();
            }

            Event::BackPressed => {
                if model.selection.take().is_some() {
                    model.resolution = None;
                    model.resolve_epoch += 1;
                    caps.render.render();
                }
            }

            Event::ViewportResized { width } => {
                let mode = ViewMode::for_width(width);
                // Only a breakpoint crossing is a state change worth
                // announcing; per-pixel resizes inside one mode are not.
                if mode != model.view_mode {
                    model.view_mode = mode;
                    caps.render.render();
                }
            }

            Event::GeocodeResponse {
                entry_id,
                epoch,
                response,
            } => {
                if epoch != model.resolve_epoch || model.selection != Some(entry_id) {
                    debug!(
                        %entry_id,
                        epoch,
                        current = model.resolve_epoch,
                        "discarding stale geocoding response"
                    );
                    return;
                }
                let Some(resolution) = model.resolution.as_mut() else {
                    return;
                };
                match Self::decode_geocode(*response) {
                    Ok(center) => {
                        debug!(%entry_id, "geocoding resolved");
                        resolution.commit(center);
                    }
                    Err(error) => {
                        warn!(%entry_id, %error, "geocoding failed");
                        resolution.fail();
                    }
                }
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let compact = model.view_mode == ViewMode::Compact;
        let list = Self::build_list_pane(model);
        let detail = model
            .selection
            .and_then(|id| Self::build_detail(model, id, compact));

        let state = if compact {
            ViewState::Compact {
                pane: match detail {
                    Some(detail) => CompactPane::Detail { detail },
                    None => CompactPane::List { list },
                },
            }
        } else {
            ViewState::Expanded { list, detail }
        };

        ViewModel {
            state,
            location_label: model.search.as_ref().map(SearchLocation::label),
        }
    }
}

impl App {
    /// Builds the directory query URL, expanding a two-letter state
    /// abbreviation to the full lowercase name the endpoint expects.
    fn directory_url(config: &AppConfig, city: &str, state: &str) -> Result<String, AppError> {
        let state_name = Self::normalize_state(state)?;
        let mut url = Url::parse(&config.directory_url).map_err(|e| {
            AppError::new(ErrorKind::Validation, "invalid directory endpoint")
                .with_internal(e.to_string())
        })?;
        url.query_pairs_mut()
            .append_pair("by_city", city.trim())
            .append_pair("by_state", &state_name);
        Ok(url.into())
    }

    fn normalize_state(state: &str) -> Result<String, AppError> {
        let trimmed = state.trim();
        if trimmed.chars().count() == 2 {
            states::unabbreviate(trimmed).map(str::to_owned).ok_or_else(|| {
                AppError::new(
                    ErrorKind::Validation,
                    format!("unrecognized state abbreviation: {trimmed}"),
                )
            })
        } else {
            Ok(trimmed.to_ascii_lowercase().replace(' ', "_"))
        }
    }

    fn geocode_url(config: &AppConfig, query: &str) -> Result<String, AppError> {
        let mut url = Url::parse(&config.geocoding_url).map_err(|e| {
            AppError::new(ErrorKind::Validation, "invalid geocoding endpoint")
                .with_internal(e.to_string())
        })?;
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", &config.geocoding_api_key);
        Ok(url.into())
    }

    /// (Re)starts resolution for the current selection.
    ///
    /// Embedded coordinates resolve synchronously with no network involved;
    /// otherwise a geocoding request goes out tagged with the entry identity
    /// and the new epoch, so a stale completion can never overwrite a newer
    /// selection's state.
    fn begin_resolution(model: &mut Model, caps: &Capabilities) {
        let Some(id) = model.selection else { return };
        model.resolve_epoch += 1;

        let (embedded, query) = match model.entry(id) {
            Some(entry) => (entry.embedded_coordinate(), entry.address_query()),
            None => {
                model.resolution = None;
                return;
            }
        };

        if let Some(center) = embedded {
            model.resolution = Some(ResolutionState::resolved(id, center));
            return;
        }

        model.resolution = Some(ResolutionState::pending(id));
        match Self::geocode_url(&model.config, &query) {
            Ok(url) => {
                let epoch = model.resolve_epoch;
                debug!(entry_id = %id, url = %url, "issuing geocoding request");
                caps.http.get(&url).send(move |response| Event::GeocodeResponse {
                    entry_id: id,
                    epoch,
                    response: Box::new(response),
                });
            }
            Err(error) => {
                warn!(entry_id = %id, %error, "could not build geocoding request");
                if let Some(resolution) = model.resolution.as_mut() {
                    resolution.fail();
                }
            }
        }
    }

    fn decode_entries(response: HttpResult) -> Result<Vec<Entry>, AppError> {
        let body = Self::success_body(response, "directory")?;
        serde_json::from_slice(&body).map_err(|e| {
            AppError::new(ErrorKind::MalformedResponse, "unexpected directory payload")
                .with_internal(e.to_string())
        })
    }

    fn decode_geocode(response: HttpResult) -> Result<Coordinate, AppError> {
        let body = Self::success_body(response, "geocoding")?;
        resolver::decode_payload(&body)
    }

    /// Unwraps a raw HTTP outcome down to a successful response body;
    /// transport errors and non-2xx statuses both map to [`ErrorKind::Network`].
    fn success_body(response: HttpResult, surface: &str) -> Result<Vec<u8>, AppError> {
        let mut response = response.map_err(|e| {
            AppError::new(ErrorKind::Network, format!("could not reach the {surface} service"))
                .with_internal(e.to_string())
        })?;
        if !response.status().is_success() {
            return Err(AppError::new(
                ErrorKind::Network,
                format!("{surface} query returned {}", response.status()),
            ));
        }
        Ok(response.take_body().unwrap_or_default())
    }

    fn build_list_pane(model: &Model) -> ListPane {
        let items: Vec<EntryListItem> = model
            .visible_entries()
            .map(|entry| EntryListItem {
                id: entry.id,
                name: entry.name.clone(),
                category: entry.category.to_string(),
                street: entry.street.clone(),
                locality: view::format_locality(entry),
                website_url: entry.website_url.clone(),
                selected: model.selection == Some(entry.id),
            })
            .collect();

        let banner = if model.list_error.is_some() || model.filter.error() {
            Some(Banner::Danger {
                message: view::LIST_ERROR_TEXT.to_owned(),
            })
        } else if items.is_empty() && !model.is_loading && model.search.is_some() {
            let location = model
                .search
                .as_ref()
                .map(SearchLocation::label)
                .unwrap_or_default();
            Some(Banner::Info {
                message: format!(
                    "We could not find any breweries in {location} matching your description."
                ),
            })
        } else {
            None
        };

        ListPane {
            filter_text: model.filter.text().to_owned(),
            items,
            is_loading: model.is_loading,
            banner,
        }
    }

    fn build_detail(model: &Model, id: EntryId, compact: bool) -> Option<EntryDetail> {
        let entry = model.entry(id)?;
        let resolution = model
            .resolution
            .as_ref()
            .filter(|resolution| resolution.entry_id == id);

        let map = match resolution {
            Some(resolution) if resolution.status == ResolutionStatus::Failed => {
                MapView::Unavailable {
                    message: view::LOCATION_ERROR_TEXT.to_owned(),
                }
            }
            Some(resolution) => MapView::Pin {
                lat: resolution.center.lat(),
                lng: resolution.center.lng(),
                zoom: DEFAULT_MAP_ZOOM,
                resolving: resolution.status == ResolutionStatus::Pending,
            },
            // Selection implies resolution state; render the stand-in center
            // rather than nothing if that invariant ever slips.
            None => MapView::Pin {
                lat: crate::DEFAULT_CENTER_LAT,
                lng: crate::DEFAULT_CENTER_LNG,
                zoom: DEFAULT_MAP_ZOOM,
                resolving: false,
            },
        };

        Some(EntryDetail {
            id: entry.id,
            name: entry.name.clone(),
            category: entry.category.to_string(),
            website_url: entry.website_url.clone(),
            address: view::format_address(entry),
            phone: view::format_phone(&entry.phone),
            tag_row: view::format_tag_row(&entry.tags),
            map,
            show_back_control: compact,
        })
    }
}
