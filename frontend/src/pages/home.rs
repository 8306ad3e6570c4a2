use atlas_core::view::{self, HOME_CARD_COUNT, HomeCard};
use atlas_core::{Event, Explorer};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::browser;
use crate::components::Banner;

fn pick_cards(explorer: &Explorer) -> Vec<HomeCard> {
    let events = explorer.catalog().events();
    let picks: Vec<&Event> = view::sample_indices(events.len(), HOME_CARD_COUNT, browser::random)
        .into_iter()
        .map(|i| &events[i])
        .collect();
    view::home_cards(explorer.catalog(), &picks)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let data: RwSignal<Option<(usize, Vec<HomeCard>, Option<String>)>> = RwSignal::new(None);

    spawn_local(async move {
        let explorer = api::load_explorer().await;
        data.set(Some((
            explorer.catalog().events().len(),
            pick_cards(&explorer),
            explorer.banner(),
        )));
    });

    view! {
        <div>
            <h2>"Four thousand years of Vietnamese history"</h2>
            {move || match data.get() {
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
                Some((total, cards, banner)) => view! {
                    <Banner message=banner/>
                    <div class="stats-grid">
                        <div class="stat-card">
                            <div class="num">{total}</div>
                            <div class="label">"Historical events"</div>
                        </div>
                    </div>
                    <div class="card-grid">
                        {cards.into_iter().map(|card| {
                            let href = format!("/events/{}", card.id.unwrap_or_default());
                            view! {
                                <A href=href attr:class="home-card">
                                    <div class="event-image" style=format!("background:{}", card.gradient)>
                                        {card.featured.then(|| view! { <span class="badge">"Featured"</span> })}
                                    </div>
                                    <div class="event-meta">
                                        <span class="event-date">{card.date}</span>
                                        <span class="event-period">{card.period}</span>
                                    </div>
                                    <h3>{card.title}</h3>
                                    <p>{card.summary}</p>
                                </A>
                            }
                        }).collect_view()}
                    </div>
                    <A href="/events" attr:class="button">"Browse all events"</A>
                }.into_any(),
            }}
        </div>
    }
}
