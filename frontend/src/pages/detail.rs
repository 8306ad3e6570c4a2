use atlas_core::detail::{DetailView, SharePayload};
use atlas_core::handoff::{self, Handoff, MAP_KEY, TIMELINE_KEY};
use atlas_core::{Event, Explorer, LoadError};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api;
use crate::browser::{self, BrowserSession};

type Loaded = Result<(Event, Explorer), LoadError>;

fn leave_note(key: &str, note: &Handoff) {
    if let Err(e) = handoff::write(&mut BrowserSession, key, note) {
        warn!("{e}");
    }
}

#[component]
pub fn DetailPage() -> impl IntoView {
    let params = use_params_map();
    let state: RwSignal<Option<Loaded>> = RwSignal::new(None);

    Effect::new(move |_| {
        let id = params.with(|p| p.get("id")).unwrap_or_default();
        state.set(None);
        spawn_local(async move {
            let (event, explorer) = futures::join!(api::load_event(&id), api::load_explorer());
            state.set(Some(event.map(|e| (e, explorer))));
        });
    });

    Effect::new(move |_| {
        state.with(|s| match s {
            Some(Ok((event, explorer))) => {
                browser::set_document_title(&DetailView::build(explorer.catalog(), event).document_title());
            }
            Some(Err(_)) => browser::set_document_title("Event not found - Vietnamese History"),
            None => {}
        });
    });

    let navigate = use_navigate();

    view! {
        <div class="detail">
            {move || state.with(|s| match s {
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
                Some(Err(e)) if e.is_not_found() => view! {
                    <div class="error-page">
                        <h2>"Event not found"</h2>
                        <p>"The event you are looking for does not exist or has been removed."</p>
                        <A href="/events">"Back to events"</A>
                    </div>
                }.into_any(),
                Some(Err(e)) => {
                    warn!("{e}");
                    view! {
                        <div class="error-page">
                            <h2>"Could not load this event"</h2>
                            <p>"Please try again later."</p>
                            <A href="/events">"Back to events"</A>
                        </div>
                    }.into_any()
                }
                Some(Ok((event, explorer))) => {
                    let detail = DetailView::build(explorer.catalog(), event);
                    let map_note = Handoff::for_map(event);
                    let timeline_note = Handoff::for_timeline(event);
                    let payload = SharePayload::new(event, &browser::current_url());
                    let to_map = navigate.clone();
                    let to_timeline = navigate.clone();

                    let on_map = move |_: leptos::ev::MouseEvent| match &map_note {
                        None => browser::alert("Location coordinates not available for this event."),
                        Some(note) => {
                            leave_note(MAP_KEY, note);
                            to_map("/map", Default::default());
                        }
                    };
                    let on_timeline = move |_: leptos::ev::MouseEvent| {
                        leave_note(TIMELINE_KEY, &timeline_note);
                        to_timeline("/timeline", Default::default());
                    };
                    let on_share = move |_: leptos::ev::MouseEvent| {
                        let payload = payload.clone();
                        spawn_local(async move {
                            let _ = browser::share(&payload).await;
                        });
                    };

                    view! {
                        <article>
                            <header>
                                <h2>{detail.title}</h2>
                                {detail.localized_title.map(|t| view! { <p class="localized">{t}</p> })}
                                <div class="event-meta">
                                    <span class="event-date">{detail.date}</span>
                                    <span class="event-place">{detail.location.clone()}</span>
                                    <span class="event-period">{detail.period.clone()}</span>
                                </div>
                            </header>
                            <section class="description">
                                {detail.description.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
                            </section>
                            {(!detail.significance.is_empty()).then(|| view! {
                                <section class="significance">
                                    <h3>"Historical significance"</h3>
                                    {detail.significance.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
                                </section>
                            })}
                            {(!detail.key_figures.is_empty()).then(|| view! {
                                <section class="key-figures">
                                    <h3>"Key figures"</h3>
                                    {detail.key_figures.into_iter().map(|f| view! {
                                        <div class="figure">
                                            <strong>{f.name}</strong>
                                            <span class="role">{f.role}</span>
                                            <p>{f.description}</p>
                                        </div>
                                    }).collect_view()}
                                </section>
                            })}
                            <aside class="sidebar">
                                <dl>
                                    <dt>"Date"</dt><dd>{detail.date_full}</dd>
                                    <dt>"Location"</dt><dd>{detail.location}</dd>
                                    <dt>"Period"</dt><dd>{detail.period}</dd>
                                    {detail.kind.map(|k| view! { <dt>"Type"</dt><dd>{k}</dd> })}
                                </dl>
                                <div class="actions">
                                    <button on:click=on_map>"View on map"</button>
                                    <button on:click=on_timeline>"View on timeline"</button>
                                    <button on:click=on_share>"Share"</button>
                                </div>
                                {(!detail.tags.is_empty()).then(|| view! {
                                    <div class="tags">
                                        {detail.tags.into_iter().map(|t| view! { <span class="tag">{t}</span> }).collect_view()}
                                    </div>
                                })}
                            </aside>
                            {(!detail.related.is_empty()).then(|| view! {
                                <section class="related">
                                    <h3>"Related events"</h3>
                                    {detail.related.into_iter().map(|r| view! {
                                        <A href=format!("/events/{}", r.id.unwrap_or_default()) attr:class="related-card">
                                            <span class="event-date">{r.date}</span>
                                            <h4>{r.title}</h4>
                                            <p>{r.summary}</p>
                                        </A>
                                    }).collect_view()}
                                </section>
                            })}
                        </article>
                    }.into_any()
                }
            })}
        </div>
    }
}
