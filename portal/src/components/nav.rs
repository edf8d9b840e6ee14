//! Left navigation grouped by portal.

use leptos::prelude::*;
use leptos_router::components::A;

struct NavLink {
    href: &'static str,
    label: &'static str,
}

struct NavGroup {
    title: &'static str,
    links: &'static [NavLink],
}

const GROUPS: &[NavGroup] = &[
    NavGroup {
        title: "Admin",
        links: &[
            NavLink { href: "/admin/users", label: "Users" },
            NavLink { href: "/admin/dues", label: "Dues" },
            NavLink { href: "/admin/services", label: "Services" },
        ],
    },
    NavGroup {
        title: "Clinic",
        links: &[
            NavLink { href: "/clinic/services", label: "My services" },
            NavLink { href: "/clinic/slots", label: "Slots" },
        ],
    },
    NavGroup { title: "Expert", links: &[NavLink { href: "/expert/portal", label: "Bookings & slots" }] },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <A href="/" attr:class="sidebar__brand">
                "CareHub"
            </A>
            {GROUPS
                .iter()
                .map(|group| {
                    view! {
                        <div class="sidebar__group">
                            <span class="sidebar__title">{group.title}</span>
                            {group
                                .links
                                .iter()
                                .map(|link| {
                                    view! {
                                        <A href=link.href attr:class="sidebar__link">
                                            {link.label}
                                        </A>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </nav>
    }
}
