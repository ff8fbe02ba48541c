//! Dashboard landing page with one card per resource.

use leptos::prelude::*;

use crud::ResourceSpec;

use crate::catalog;
use crate::pages::layout::PageLayout;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <PageLayout>
            <section class="dashboard-page">
                <h1>"Dashboard"</h1>
                <div class="dashboard-page__cards">{resource_cards()}</div>
            </section>
        </PageLayout>
    }
}

fn resource_cards() -> AnyView {
    match catalog::resources() {
        Ok(all) => all.iter().map(resource_card).collect_view().into_any(),
        Err(e) => view! { <p class="dashboard-page__error">{format!("Catalog error: {e}")}</p> }.into_any(),
    }
}

fn resource_card(spec: &ResourceSpec) -> AnyView {
    let href = catalog::resource_path(&spec.key);
    let meta = card_meta(spec);
    view! {
        <a class="resource-card" href=href>
            <h2 class="resource-card__title">{spec.heading.clone()}</h2>
            <p class="resource-card__meta">{meta}</p>
        </a>
    }
    .into_any()
}

/// Card subtitle, e.g. `Local · 2 sample rows`.
fn card_meta(spec: &ResourceSpec) -> String {
    let source = if spec.is_local() { "Local" } else { "Synced" };
    match spec.fixtures.len() {
        0 => source.to_owned(),
        1 => format!("{source} · 1 sample row"),
        n => format!("{source} · {n} sample rows"),
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;
