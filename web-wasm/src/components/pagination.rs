//! ページボタン

use interview_common::{Command, PageLink};
use leptos::prelude::*;

#[component]
pub fn Pagination<F>(links: Signal<Vec<PageLink>>, on_command: F) -> impl IntoView
where
    F: Fn(Command) + 'static + Clone + Send,
{
    view! {
        <nav class="pagination">
            <For
                each=move || links.get()
                key=|link| (link.number, link.active)
                children=move |link| {
                    let on_command = on_command.clone();
                    view! {
                        <button
                            class="btn btn-small page-link"
                            class:active=link.active
                            on:click=move |_| on_command(Command::SetPage(link.number))
                        >
                            {link.number}
                        </button>
                    }
                }
            />
        </nav>
    }
}
