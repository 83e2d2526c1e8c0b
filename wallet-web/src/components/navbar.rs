//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::wallet::use_wallet_context;
use crate::utils::constants::APP_TITLE;
use crate::utils::format::truncate_address;

#[component]
pub fn Navbar() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">{APP_TITLE}</span>
                </A>
                {move || {
                    wallet_ctx.address().map(|address| {
                        view! {
                            <span class="address-badge" title=address.clone()>
                                {truncate_address(&address)}
                            </span>
                        }
                    })
                }}
            </div>
        </nav>
    }
}
