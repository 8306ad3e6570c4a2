use atlas_core::Explorer;
use atlas_core::handoff::{self, MAP_KEY};
use atlas_core::location::{CANVAS_VIEW_BOX, MapZoom, PlotPoint};
use atlas_core::search::SearchOptions;
use atlas_core::view::MapPopup;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::browser::BrowserSession;
use crate::components::{Banner, FilterBar, SearchBox, StatsBar};

fn popup_for(explorer: &Explorer, id: &str) -> Option<MapPopup> {
    let event = explorer.catalog().event(id)?;
    Some(MapPopup::build(explorer.catalog(), event))
}

#[component]
pub fn MapPage() -> impl IntoView {
    let explorer: RwSignal<Option<Explorer>> = RwSignal::new(None);
    let zoom = RwSignal::new(MapZoom::default());
    let popup: RwSignal<Option<MapPopup>> = RwSignal::new(None);

    spawn_local(async move {
        let mut ex = api::load_explorer().await;
        if let Some(note) = handoff::take_once(&mut BrowserSession, MAP_KEY) {
            log!("map opened for {:?}", note.title);
            let found = ex.apply_handoff(&note).is_some();
            if found && let Some(id) = note.id.as_deref() {
                popup.set(popup_for(&ex, id));
            }
        }
        explorer.set(Some(ex));
    });

    let show = move |id: String| {
        popup.set(explorer.with_untracked(|ex| ex.as_ref().and_then(|ex| popup_for(ex, &id))));
    };

    let on_period = Callback::new(move |id: String| {
        explorer.update(|ex| {
            if let Some(ex) = ex {
                ex.filter_by_period(&id);
            }
        });
        popup.set(None);
    });

    let on_sub_period = Callback::new(move |id: String| {
        explorer.update(|ex| {
            if let Some(ex) = ex {
                if ex.filter().sub_period() == Some(id.as_str()) {
                    ex.clear_sub_period();
                } else {
                    ex.filter_by_sub_period(&id);
                }
            }
        });
    });

    let on_pick = Callback::new(move |id: String| {
        explorer.update(|ex| {
            if let Some(ex) = ex {
                ex.focus_event(&id);
            }
        });
        show(id);
    });

    let (width, height) = CANVAS_VIEW_BOX;

    view! {
        <div class="map-page">
            <h2>"Historical map"</h2>
            <SearchBox explorer=explorer options=SearchOptions::map() on_pick=on_pick/>
            {move || explorer.with(|ex| match ex {
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
                Some(ex) => {
                    let map = ex.map_view();
                    view! {
                        <Banner message=ex.banner()/>
                        <FilterBar buttons=map.filters on_select=on_period/>
                        {(!map.sub_filters.is_empty()).then(|| view! {
                            <FilterBar buttons=map.sub_filters on_select=on_sub_period/>
                        })}
                        <div class="map-layout">
                            <div class="map-canvas">
                                <div class="zoom-controls">
                                    <button on:click=move |_| zoom.update(MapZoom::zoom_in)>"+"</button>
                                    <button on:click=move |_| zoom.update(MapZoom::zoom_out)>"−"</button>
                                    <button on:click=move |_| zoom.update(MapZoom::reset)>"Reset"</button>
                                </div>
                                <svg viewBox=move || zoom.get().view_box() width="100%">
                                    <rect x="0" y="0" width=width.to_string() height=height.to_string() fill="#eef2f7"/>
                                    {map.markers.into_iter().filter_map(|m| {
                                        let PlotPoint::Canvas { x, y } = m.point else {
                                            return None;
                                        };
                                        let id = m.id.unwrap_or_default();
                                        Some(view! {
                                            <circle
                                                cx=x.to_string()
                                                cy=y.to_string()
                                                r="8"
                                                fill=m.color
                                                stroke="#fff"
                                                stroke-width="2"
                                                on:click=move |_| show(id.clone())
                                            >
                                                <title>{m.title}</title>
                                            </circle>
                                        })
                                    }).collect_view()}
                                </svg>
                            </div>
                            <ul class="annotations">
                                {map.annotations.into_iter().map(|a| {
                                    let id = a.id.unwrap_or_default();
                                    view! {
                                        <li on:click=move |_| show(id.clone())>
                                            <span class="dot" style=format!("background:{}", a.color)></span>
                                            <strong>{a.title}</strong>
                                            <span class="event-date">{a.date}</span>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        </div>
                        <StatsBar stats=map.stats/>
                    }.into_any()
                }
            })}
            {move || popup.get().map(|p| view! {
                <div class="map-popup">
                    <button class="close" on:click=move |_| popup.set(None)>"×"</button>
                    <h3>{p.title}</h3>
                    <div class="event-meta">
                        <span class="event-period">{p.period}</span>
                        <span class="event-date">{p.date}</span>
                        <span class="event-place">{p.location}</span>
                    </div>
                    <p>{p.summary}</p>
                    <A href=format!("/events/{}", p.id.unwrap_or_default())>"View details"</A>
                </div>
            })}
        </div>
    }
}
