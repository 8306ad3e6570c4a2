use atlas_core::Explorer;
use atlas_core::debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
use atlas_core::search::SearchOptions;
use atlas_core::view::{EventCard, FilterButton, SearchHit, Stats};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos_router::components::A;

/// Non-fatal notice shown above a page when some collection failed.
#[component]
pub fn Banner(message: Option<String>) -> impl IntoView {
    message.map(|m| view! { <p class="banner">{m}</p> })
}

#[component]
pub fn FilterBar(buttons: Vec<FilterButton>, on_select: Callback<String>) -> impl IntoView {
    view! {
        <div class="filter-bar">
            {buttons
                .into_iter()
                .map(|b| {
                    let value = b.value.clone();
                    view! {
                        <button
                            class:active=b.active
                            on:click=move |_| on_select.run(value.clone())
                        >
                            {b.label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn StatsBar(stats: Stats) -> impl IntoView {
    view! {
        <div class="stats-grid">
            <div class="stat-card">
                <div class="num">{stats.visible}</div>
                <div class="label">"Events shown"</div>
            </div>
            <div class="stat-card">
                <div class="num">{stats.total}</div>
                <div class="label">"Total events"</div>
            </div>
            <div class="stat-card">
                <div class="num">{stats.periods}</div>
                <div class="label">"Periods"</div>
            </div>
            <div class="stat-card">
                <div class="num">{stats.years_of_history}</div>
                <div class="label">"Years of history"</div>
            </div>
        </div>
    }
}

fn event_href(id: Option<&str>) -> String {
    format!("/events/{}", id.unwrap_or_default())
}

#[component]
pub fn EventCardView(card: EventCard) -> impl IntoView {
    let href = event_href(card.id.as_deref());
    let backdrop = match &card.image {
        Some(image) => format!("background-image:url({image}),{}", card.gradient),
        None => format!("background:{}", card.gradient),
    };
    view! {
        <A href=href attr:class="event-card">
            <div class="event-image" style=backdrop>
                {card.featured.then(|| view! { <span class="badge">"Featured"</span> })}
            </div>
            <div class="event-body">
                <div class="event-meta">
                    <span class="event-date">{card.date}</span>
                    <span class="event-period">{card.period}</span>
                </div>
                <h3>{card.title}</h3>
                {card.localized_title.map(|t| view! { <p class="localized">{t}</p> })}
                <p class="event-place">{card.location}</p>
                <p>{card.summary}</p>
                <div class="tags">
                    {card.tags.into_iter().map(|t| view! { <span class="tag">{t}</span> }).collect_view()}
                </div>
            </div>
        </A>
    }
}

/// Search input with a debounced results panel. The panel closes for
/// queries under two characters and says so when nothing matches.
#[component]
pub fn SearchBox(
    explorer: RwSignal<Option<Explorer>>,
    options: SearchOptions,
    on_pick: Callback<String>,
) -> impl IntoView {
    let input = RwSignal::new(String::new());
    let hits: RwSignal<Option<Vec<SearchHit>>> = RwSignal::new(None);
    let debouncer = StoredValue::new(Debouncer::<String>::new());

    // The query lives in the explorer without notifying the page; only the
    // results panel redraws.
    let run_search = move |query: String| {
        explorer.update_untracked(|ex| {
            if let Some(ex) = ex {
                ex.set_query(&query);
            }
        });
        let found = explorer.with_untracked(|ex| ex.as_ref().and_then(|ex| ex.current_hits(options)));
        hits.set(found);
    };

    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        input.set(text.clone());
        let mut ticket = None;
        debouncer.update_value(|d| ticket = Some(d.schedule(text)));
        let Some(ticket) = ticket else {
            return;
        };
        Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            let mut due = None;
            debouncer.update_value(|d| due = d.fire(ticket));
            if let Some(query) = due {
                run_search(query);
            }
        })
        .forget();
    };

    let pick = move |id: String| {
        debouncer.update_value(|d| d.cancel());
        hits.set(None);
        input.set(String::new());
        on_pick.run(id);
    };

    view! {
        <div class="search-box">
            <input
                type="search"
                placeholder="Search events, people, places…"
                prop:value=input
                on:input=on_input
            />
            {move || {
                hits.get().map(|found| {
                    if found.is_empty() {
                        return view! { <div class="search-results"><p class="empty">"No events found"</p></div> }
                            .into_any();
                    }
                    view! {
                        <ul class="search-results">
                            {found
                                .into_iter()
                                .map(|hit| {
                                    let id = hit.id.clone().unwrap_or_default();
                                    view! {
                                        <li on:click=move |_| pick(id.clone())>
                                            <strong>{hit.title}</strong>
                                            <span class="event-date">{hit.date}</span>
                                            <span class="event-period">{hit.period}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                })
            }}
        </div>
    }
}
