//! Landing page: one tile per dashboard with its headline figure.
//!
//! Figures come from a fresh fixture load, the same data each dashboard
//! starts from; edits made on another page are not reflected here.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::bookings::BookingsState;
use crate::state::dues::DuesState;
use crate::state::review::ReviewState;
use crate::state::users::UsersState;
use crate::util::format;

struct Tile {
    href: &'static str,
    portal: &'static str,
    title: String,
    headline: String,
    detail: String,
}

fn tiles() -> Vec<Tile> {
    let users = UsersState::from_fixtures().stats();
    let dues = DuesState::from_fixtures().summary();
    let review = ReviewState::from_fixtures();
    let bookings = BookingsState::from_fixtures();
    let counts = bookings.counts();

    vec![
        Tile {
            href: "/admin/users",
            portal: "Admin",
            title: "Users".to_owned(),
            headline: format::count(users.total, "account"),
            detail: format!("{} active · {} blocked", users.active, users.blocked),
        },
        Tile {
            href: "/admin/dues",
            portal: "Admin",
            title: "Dues".to_owned(),
            headline: format::rupees(dues.outstanding),
            detail: format!("outstanding · {}% of fees collected", dues.collected_percent()),
        },
        Tile {
            href: "/admin/services",
            portal: "Admin",
            title: "Services".to_owned(),
            headline: format::count(review.pending_count(), "listing"),
            detail: "awaiting review".to_owned(),
        },
        Tile {
            href: "/clinic/services",
            portal: "Clinic",
            title: "My services".to_owned(),
            headline: "Listings".to_owned(),
            detail: "Pricing, ranking and display dates".to_owned(),
        },
        Tile {
            href: "/clinic/slots",
            portal: "Clinic",
            title: "Slots".to_owned(),
            headline: "Calendar".to_owned(),
            detail: "Single slots and recurring batches".to_owned(),
        },
        Tile {
            href: "/expert/portal",
            portal: "Expert",
            title: bookings.expert.name.clone(),
            headline: format::count(counts.pending, "pending booking"),
            detail: format!("{} confirmed · {} earned", counts.confirmed, format::rupees(counts.earned)),
        },
    ]
}

#[component]
pub fn OverviewPage() -> impl IntoView {
    view! {
        <section class="page">
            <header class="page__header">
                <div>
                    <h1>"Overview"</h1>
                    <p class="page__subtitle">"Marketplace administration, clinic and expert dashboards"</p>
                </div>
            </header>
            <div class="tile-grid">
                {tiles()
                    .into_iter()
                    .map(|tile| {
                        view! {
                            <A href=tile.href attr:class="tile">
                                <span class="tile__portal">{tile.portal}</span>
                                <h2 class="tile__title">{tile.title}</h2>
                                <strong class="tile__headline">{tile.headline}</strong>
                                <span class="tile__detail">{tile.detail}</span>
                            </A>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
