use atlas_core::search::SearchOptions;
use atlas_core::{Explorer, SortMode};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::{Banner, EventCardView, FilterBar, SearchBox, StatsBar};

#[component]
pub fn EventsPage() -> impl IntoView {
    let explorer: RwSignal<Option<Explorer>> = RwSignal::new(None);

    spawn_local(async move {
        explorer.set(Some(api::load_explorer().await));
    });

    let on_select = Callback::new(move |id: String| {
        explorer.update(|ex| {
            if let Some(ex) = ex {
                ex.filter_by_period(&id);
            }
        });
    });

    let on_sort = move |ev: leptos::ev::Event| {
        if let Ok(mode) = event_target_value(&ev).parse::<SortMode>() {
            explorer.update(|ex| {
                if let Some(ex) = ex {
                    ex.sort(mode);
                }
            });
        }
    };

    let navigate = use_navigate();
    let on_pick = Callback::new(move |id: String| {
        navigate(&format!("/events/{id}"), Default::default());
    });

    view! {
        <div>
            <h2>"Historical events"</h2>
            <SearchBox explorer=explorer options=SearchOptions::list() on_pick=on_pick/>
            {move || explorer.with(|ex| match ex {
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
                Some(ex) => {
                    let list = ex.list_view();
                    let current = list.sort;
                    view! {
                        <Banner message=ex.banner()/>
                        <FilterBar buttons=list.filters on_select=on_select/>
                        <div class="toolbar">
                            <select on:change=on_sort prop:value=current.as_str()>
                                {SortMode::ALL.into_iter().map(|m| view! {
                                    <option value=m.as_str() selected=m == current>{m.label()}</option>
                                }).collect_view()}
                            </select>
                        </div>
                        <StatsBar stats=list.stats/>
                        {if list.cards.is_empty() {
                            view! { <p class="empty">"No events match this filter."</p> }.into_any()
                        } else {
                            view! {
                                <div class="card-grid">
                                    {list.cards.into_iter().map(|card| view! { <EventCardView card=card/> }).collect_view()}
                                </div>
                            }.into_any()
                        }}
                    }.into_any()
                }
            })}
        </div>
    }
}
