//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the alert
//! container of the base page.

use maud::{Markup, html};

/// An alert message with a short headline and optional details.
#[derive(Debug, Clone)]
pub enum Alert {
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let Alert::Error { message, details } = self;
        let style = "text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 \
            dark:text-red-400 dark:border-red-800";

        html!(
            div
                role="alert"
                class={ "flex flex-col p-4 mb-4 text-sm border rounded-lg " (style) }
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }

                button
                    type="button"
                    class="self-end underline"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "Dismiss"
                }
            }
        )
    }
}
