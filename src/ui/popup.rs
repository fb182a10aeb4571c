/// Popup UI for the Tab Shelf extension

use crate::background::{Reply, Request};
use crate::browser;
use crate::groups;
use crate::tab_data::TabRecord;
use crate::thumbnail;
use patternfly_yew::prelude::*;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Progress of one popup action, owned by the component and handed to the
/// rendering code
#[derive(Clone, PartialEq)]
enum ActionState {
    Idle,
    Running,
    Done,
    Failed(String),
}

impl ActionState {
    fn is_running(&self) -> bool {
        matches!(self, ActionState::Running)
    }
}

#[function_component(Popup)]
pub fn popup() -> Html {
    let save_state = use_state(|| ActionState::Idle);
    let archive_state = use_state(|| ActionState::Idle);
    let close_state = use_state(|| ActionState::Idle);
    let dashboard_state = use_state(|| ActionState::Idle);

    let is_busy = save_state.is_running()
        || archive_state.is_running()
        || close_state.is_running()
        || dashboard_state.is_running();

    // Save goes through the background coordinator
    let on_save = {
        let state = save_state.clone();
        Callback::from(move |_| {
            run_action(state.clone(), request_action(Request::SaveTabs));
        })
    };

    // Save-and-close captures thumbnails, so it runs in the popup where
    // each tab can be activated and captured in turn
    let on_archive = {
        let state = archive_state.clone();
        Callback::from(move |_| {
            run_action(state.clone(), save_and_close());
        })
    };

    let on_close = {
        let state = close_state.clone();
        Callback::from(move |_| {
            run_action(state.clone(), request_action(Request::CloseAllTabs));
        })
    };

    let on_dashboard = {
        let state = dashboard_state.clone();
        Callback::from(move |_| {
            run_action(state.clone(), request_action(Request::OpenDashboard));
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Shelf"}</h1>

            {status_row("Saving tabs", &save_state)}
            {status_row("Saving and closing tabs", &archive_state)}
            {status_row("Closing tabs", &close_state)}
            {status_row("Opening dashboard", &dashboard_state)}

            <div class="flex-column-gap">
                <Button onclick={on_save} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"💾 Save All Tabs"}
                </Button>
                <Button onclick={on_archive} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"📦 Save and Close All Tabs"}
                </Button>
                <Button onclick={on_close} disabled={is_busy} variant={ButtonVariant::Danger} block={true}>
                    {"🚪 Close All Tabs"}
                </Button>
                <Button onclick={on_dashboard} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"📂 Open Dashboard"}
                </Button>
            </div>

            <p class="footer-popup">
                {"Tab Shelf v0.1.0"}
            </p>
        </div>
    }
}

fn status_row(label: &str, state: &UseStateHandle<ActionState>) -> Html {
    match &**state {
        ActionState::Idle => html! {},
        ActionState::Running => html! {
            <div class="loading-text-center">
                <Spinner />
                <p class="loading-text">{format!("{}...", label)}</p>
            </div>
        },
        ActionState::Done => html! {
            <p class="message-text">{format!("{} finished", label)}</p>
        },
        ActionState::Failed(err) => html! {
            <Alert r#type={AlertType::Danger} title={label.to_string()} inline={true}>
                {err.clone()}
            </Alert>
        },
    }
}

/// Drive one action future and track it in `state`
fn run_action<F>(state: UseStateHandle<ActionState>, action: F)
where
    F: Future<Output = Result<(), String>> + 'static,
{
    state.set(ActionState::Running);
    spawn_local(async move {
        match action.await {
            Ok(()) => state.set(ActionState::Done),
            Err(e) => {
                log::error!("{}", e);
                state.set(ActionState::Failed(e));
            }
        }
    });
}

// Helper functions

/// Send one request to the background coordinator and wait for its reply
async fn request_action(request: Request) -> Result<(), String> {
    let value = serde_wasm_bindgen::to_value(&request)
        .map_err(|e| format!("Failed to encode request: {:?}", e))?;

    let reply_js = browser::send_message(value).await?;
    let reply: Reply = serde_wasm_bindgen::from_value(reply_js)
        .map_err(|e| format!("Failed to parse reply: {:?}", e))?;

    if reply.success {
        Ok(())
    } else {
        Err("Background reported failure".to_string())
    }
}

/// Capture a thumbnail per tab, save the group, then close every
/// background tab of the window
async fn save_and_close() -> Result<(), String> {
    let tabs = browser::current_window_tabs().await?;

    let mut records = Vec::with_capacity(tabs.len());
    for tab in &tabs {
        let thumbnail = thumbnail::capture_and_resize(tab).await;
        records.push(TabRecord::from_snapshot(tab).with_thumbnail(thumbnail));
    }
    groups::save_group(records).await?;

    for tab in browser::background_tabs().await? {
        browser::close_tab(tab.id).await?;
    }
    Ok(())
}
