use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

use crate::pages::{
    detail::DetailPage, events::EventsPage, home::HomePage, map::MapPage, timeline::TimelinePage,
};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div id="app">
                <header>
                    <h1>"Vietnamese History"</h1>
                    <nav>
                        <A href="/">"Home"</A>
                        <A href="/events">"Events"</A>
                        <A href="/map">"Map"</A>
                        <A href="/timeline">"Timeline"</A>
                    </nav>
                </header>
                <main>
                    <Routes fallback=|| {
                        view! { <p class="error">"Page not found"</p> }
                    }>
                        <Route path=path!("/") view=HomePage/>
                        <Route path=path!("/events") view=EventsPage/>
                        <Route path=path!("/events/:id") view=DetailPage/>
                        <Route path=path!("/map") view=MapPage/>
                        <Route path=path!("/timeline") view=TimelinePage/>
                    </Routes>
                </main>
                <footer>
                    <p>"From Văn Lang to the present day"</p>
                </footer>
            </div>
        </Router>
    }
}
