//! 候補者テーブル

use interview_common::{Command, RowView};
use leptos::prelude::*;

#[component]
pub fn DataTable<F>(rows: Signal<Vec<RowView>>, on_command: F) -> impl IntoView
where
    F: Fn(Command) + 'static + Clone + Send + Sync,
{
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th></th>
                    <th>"Candidate Name"</th>
                    <th>"Interview Question"</th>
                    <th>"Candidate Response"</th>
                    <th>"AI Score"</th>
                </tr>
            </thead>
            <tbody>
                <Show
                    when=move || !rows.with(|r| r.is_empty())
                    fallback=|| view! { <tr><td colspan="5" class="text-muted">"該当するレコードがありません"</td></tr> }
                >
                    <For
                        each=move || rows.get()
                        key=|row| (row.record.candidate_name.clone(), row.selected)
                        children={
                            let on_command = on_command.clone();
                            move |row| {
                                let on_command = on_command.clone();
                                let name = row.record.candidate_name.clone();
                                view! {
                                    <tr class:selected=row.selected>
                                        <td>
                                            <input
                                                type="checkbox"
                                                prop:checked=row.selected
                                                on:change=move |_| on_command(Command::Toggle(name.clone()))
                                            />
                                        </td>
                                        <td>{row.record.candidate_name.clone()}</td>
                                        <td>{row.record.interview_question.clone()}</td>
                                        <td>{row.record.candidate_response.clone()}</td>
                                        <td class="score">{row.record.ai_generated_score}</td>
                                    </tr>
                                }
                            }
                        }
                    />
                </Show>
            </tbody>
        </table>
    }
}
