//! 検索語とページサイズの入力欄

use interview_common::Command;
use leptos::prelude::*;

#[component]
pub fn SearchBar<F>(
    search_term: Signal<String>,
    page_size: Signal<usize>,
    on_command: F,
) -> impl IntoView
where
    F: Fn(Command) + 'static + Clone + Send,
{
    view! {
        <div class="search-bar">
            <div class="form-group">
                <label for="search">"検索"</label>
                <input
                    type="text"
                    id="search"
                    placeholder="候補者名・質問・回答"
                    prop:value=move || search_term.get()
                    on:input={
                        let on_command = on_command.clone();
                        move |ev| on_command(Command::SetSearchTerm(event_target_value(&ev)))
                    }
                />
            </div>

            <div class="form-group">
                <label for="page-size">"表示件数"</label>
                <input
                    type="number"
                    id="page-size"
                    min="1"
                    prop:value=move || page_size.get().to_string()
                    on:input={
                        let on_command = on_command.clone();
                        move |ev| {
                            // 入力途中の空欄や非数値は無視する
                            if let Some(command) = Command::page_size_input(&event_target_value(&ev)) {
                                on_command(command);
                            }
                        }
                    }
                />
            </div>
        </div>
    }
}
