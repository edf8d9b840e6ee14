//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{nav::Sidebar, toast::Toast};
use crate::pages::{
    admin_dues::AdminDuesPage, admin_services::AdminServicesPage, admin_users::AdminUsersPage,
    clinic_services::ClinicServicesPage, clinic_slots::ClinicSlotsPage, expert_portal::ExpertPortalPage,
    overview::OverviewPage,
};
use crate::state::notice::Notices;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the toast context shared by every page and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(RwSignal::new(Notices::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/carehub.css"/>
        <Title text="CareHub"/>

        <Router>
            <div class="layout">
                <Sidebar/>
                <main class="layout__main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=OverviewPage/>
                        <Route path=(StaticSegment("admin"), StaticSegment("users")) view=AdminUsersPage/>
                        <Route path=(StaticSegment("admin"), StaticSegment("dues")) view=AdminDuesPage/>
                        <Route path=(StaticSegment("admin"), StaticSegment("services")) view=AdminServicesPage/>
                        <Route path=(StaticSegment("clinic"), StaticSegment("services")) view=ClinicServicesPage/>
                        <Route path=(StaticSegment("clinic"), StaticSegment("slots")) view=ClinicSlotsPage/>
                        <Route path=(StaticSegment("expert"), StaticSegment("portal")) view=ExpertPortalPage/>
                    </Routes>
                </main>
                <Toast/>
            </div>
        </Router>
    }
}
