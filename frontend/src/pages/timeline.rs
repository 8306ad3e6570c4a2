use atlas_core::Explorer;
use atlas_core::format::format_year;
use atlas_core::handoff::{self, TIMELINE_KEY};
use atlas_core::timeline::{ItemKind, TimelineWindow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::browser::BrowserSession;
use crate::components::{Banner, FilterBar, StatsBar};

const AXIS_TICKS: usize = 6;

fn percent(value: f64, window: TimelineWindow) -> f64 {
    (value - window.start) / (window.end - window.start) * 100.0
}

#[component]
pub fn TimelinePage() -> impl IntoView {
    let explorer: RwSignal<Option<Explorer>> = RwSignal::new(None);
    // Set by the zoom buttons; `None` follows the fitted window.
    let zoomed: RwSignal<Option<TimelineWindow>> = RwSignal::new(None);
    let selected: RwSignal<Option<String>> = RwSignal::new(None);

    spawn_local(async move {
        let mut ex = api::load_explorer().await;
        if let Some(note) = handoff::take_once(&mut BrowserSession, TIMELINE_KEY)
            && ex.apply_handoff(&note).is_some()
        {
            selected.set(note.id);
        }
        explorer.set(Some(ex));
    });

    let on_period = Callback::new(move |id: String| {
        explorer.update(|ex| {
            if let Some(ex) = ex {
                ex.filter_by_period(&id);
            }
        });
        zoomed.set(None);
    });

    let navigate = use_navigate();

    view! {
        <div class="timeline-page">
            <h2>"Timeline"</h2>
            {move || explorer.with(|ex| match ex {
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
                Some(ex) => {
                    let timeline = ex.timeline_view();
                    let base = timeline.window;
                    let window = zoomed.get().unwrap_or(base);
                    let reset = TimelineWindow::reset_for(ex.filter().period(), &timeline.items);
                    let navigate = navigate.clone();
                    view! {
                        <Banner message=ex.banner()/>
                        <FilterBar buttons=timeline.filters on_select=on_period/>
                        <div class="zoom-controls">
                            <button on:click=move |_| zoomed.set(Some(window.zoom(2.0)))>"Zoom in"</button>
                            <button on:click=move |_| zoomed.set(Some(window.zoom(0.5)))>"Zoom out"</button>
                            <button on:click=move |_| zoomed.set(Some(reset))>"Reset"</button>
                        </div>
                        <div class="timeline-axis">
                            {(0..AXIS_TICKS).map(|i| {
                                let year = window.start + (window.end - window.start) * i as f64 / (AXIS_TICKS - 1) as f64;
                                view! {
                                    <span class="tick" style=format!("left:{}%", percent(year, window))>
                                        {format_year(Some(year.round() as i32))}
                                    </span>
                                }
                            }).collect_view()}
                        </div>
                        <div class="timeline-track">
                            {timeline.items.into_iter()
                                .filter(|item| item.end.max(item.start) >= window.start && item.start <= window.end)
                                .map(|item| {
                                    let id = item.id.clone().unwrap_or_default();
                                    let is_selected = selected.get().as_deref() == Some(id.as_str());
                                    let left = percent(item.start, window);
                                    let style = match item.kind {
                                        ItemKind::Box => format!("left:{left}%;border-color:{}", item.color),
                                        ItemKind::Range => format!(
                                            "left:{left}%;width:{}%;background:{}",
                                            percent(item.end, window) - left,
                                            item.color
                                        ),
                                    };
                                    let navigate = navigate.clone();
                                    view! {
                                        <div
                                            class="timeline-item"
                                            class:selected=is_selected
                                            style=style
                                            title=item.title
                                            on:click=move |_| navigate(&format!("/events/{id}"), Default::default())
                                        >
                                            {item.content}
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <ul class="legend">
                            {timeline.legend.into_iter().map(|entry| view! {
                                <li>
                                    <span class="dot" style=format!("background:{}", entry.color)></span>
                                    <strong>{entry.name}</strong>
                                    <span class="years">{entry.years}</span>
                                </li>
                            }).collect_view()}
                        </ul>
                        <StatsBar stats=timeline.stats/>
                    }.into_any()
                }
            })}
        </div>
    }
}
