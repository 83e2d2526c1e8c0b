//! Home Page - game landing with the wallet panel

use leptos::prelude::*;

use crate::components::WalletConnect;
use crate::utils::constants::{APP_TAGLINE, APP_TITLE};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page-container" style="display: flex; flex-direction: column; align-items: center; gap: 24px; padding: 48px 24px;">
            <h1 style="color: #ffffff; font-size: 40px; font-weight: 700;">{APP_TITLE}</h1>
            <p style="color: #cccccc;">{APP_TAGLINE}</p>
            <WalletConnect/>
        </div>
    }
}
