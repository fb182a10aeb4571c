/// Dashboard page listing every saved tab group

use crate::background::{Reply, Request};
use crate::browser;
use crate::groups;
use crate::storage::GroupList;
use crate::tab_data::{TabGroup, TabRecord};
use patternfly_yew::prelude::*;
use url::Url;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Failed(String),
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let state = use_state(|| ViewState::Loading);
    let group_list = use_state(GroupList::new);

    // Reads go straight to storage, not through the coordinator
    {
        let state = state.clone();
        let group_list = group_list.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match groups::list_groups().await {
                    Ok(list) => {
                        group_list.set(list);
                        state.set(ViewState::Idle);
                    }
                    Err(e) => {
                        state.set(ViewState::Failed(format!("Failed to load: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    let on_open_all = {
        let state = state.clone();

        Callback::from(move |urls: Vec<String>| {
            let state = state.clone();
            spawn_local(async move {
                if let Err(e) = send_request(Request::OpenTabs { urls }).await {
                    state.set(ViewState::Failed(format!("Failed to open tabs: {}", e)));
                }
            });
        })
    };

    let on_delete_group = {
        let state = state.clone();
        let group_list = group_list.clone();

        Callback::from(move |index: usize| {
            let state = state.clone();
            let group_list = group_list.clone();
            spawn_local(async move {
                match groups::delete_group(index).await {
                    Ok(list) => group_list.set(list),
                    Err(e) => state.set(ViewState::Failed(format!("Failed to delete: {}", e))),
                }
            });
        })
    };

    let on_open_tab = {
        Callback::from(move |url: String| {
            browser::open_tab_detached(url);
        })
    };

    let on_delete_tab = {
        let state = state.clone();
        let group_list = group_list.clone();

        Callback::from(move |(group_index, tab_index): (usize, usize)| {
            let state = state.clone();
            let group_list = group_list.clone();
            spawn_local(async move {
                match groups::delete_tab_from_group(group_index, tab_index).await {
                    Ok(list) => group_list.set(list),
                    Err(e) => state.set(ViewState::Failed(format!("Failed to delete: {}", e))),
                }
            });
        })
    };

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Tab Shelf"}</h1>
            </div>

            // Status display
            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading saved groups..."}</p>
                    </div>
                },
                ViewState::Failed(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Idle => html! {}
            }}

            if group_list.is_empty() && !matches!(*state, ViewState::Loading) {
                <div class="empty-state">
                    <p>{"No saved tab groups yet."}</p>
                    <p class="empty-state-hint">{"Use the popup to save the tabs of this window."}</p>
                </div>
            } else {
                <div class="groups-list">
                    {for group_list.groups.iter().enumerate().map(|(index, group)| html! {
                        <GroupCard
                            key={format!("{}", group.id)}
                            group={group.clone()}
                            index={index}
                            on_open_all={on_open_all.clone()}
                            on_delete_group={on_delete_group.clone()}
                            on_open_tab={on_open_tab.clone()}
                            on_delete_tab={on_delete_tab.clone()}
                        />
                    })}
                </div>
            }

            // Footer stats
            <div class="footer">
                {format!("{} groups • {} saved tabs", group_list.len(), group_list.total_tabs())}
            </div>
        </div>
    }
}

// Group card component
#[derive(Properties, PartialEq)]
struct GroupCardProps {
    group: TabGroup,
    index: usize,
    on_open_all: Callback<Vec<String>>,
    on_delete_group: Callback<usize>,
    on_open_tab: Callback<String>,
    on_delete_tab: Callback<(usize, usize)>,
}

#[function_component(GroupCard)]
fn group_card(props: &GroupCardProps) -> Html {
    let group = &props.group;
    let index = props.index;

    html! {
        <div class="group-card">
            <div class="group-header">
                <div class="group-title-container">
                    <h2 class="group-title">{&group.name}</h2>
                    <p class="group-subtitle">{format!("{} tabs", group.urls.len())}</p>
                </div>

                <div class="group-actions">
                    <Button
                        onclick={props.on_open_all.reform({
                            let urls: Vec<String> = group.urls.iter().map(|t| t.url.clone()).collect();
                            move |_| urls.clone()
                        })}
                    >
                        {"🔄 Open All Tabs"}
                    </Button>
                    <Button
                        onclick={props.on_delete_group.reform(move |_| index)}
                        variant={ButtonVariant::Danger}
                    >
                        {"🗑️ Delete Group"}
                    </Button>
                </div>
            </div>

            <div class="tabs-list">
                {for group.urls.iter().enumerate().map(|(tab_index, record)| html! {
                    <TabCard
                        key={tab_index}
                        record={record.clone()}
                        group_index={index}
                        tab_index={tab_index}
                        on_open={props.on_open_tab.clone()}
                        on_delete={props.on_delete_tab.clone()}
                    />
                })}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TabCardProps {
    record: TabRecord,
    group_index: usize,
    tab_index: usize,
    on_open: Callback<String>,
    on_delete: Callback<(usize, usize)>,
}

#[function_component(TabCard)]
fn tab_card(props: &TabCardProps) -> Html {
    let record = &props.record;
    let group_index = props.group_index;
    let tab_index = props.tab_index;

    let title = record
        .title
        .clone()
        .unwrap_or_else(|| record.url.clone());

    html! {
        <div class="tab-card">
            <div class="tab-heading">
                if let Some(favicon) = &record.favicon {
                    <img src={favicon.clone()} alt="Favicon" class="tab-favicon" />
                }
                <span class="tab-title">{title}</span>
            </div>

            if let Some(thumbnail) = &record.thumbnail {
                <img
                    src={format!("data:image/jpeg;base64,{}", thumbnail)}
                    alt="Tab thumbnail"
                    class="tab-thumbnail"
                />
            }

            <p class="tab-host">{display_host(&record.url)}</p>

            <div class="tab-actions">
                <Button
                    onclick={props.on_open.reform({
                        let url = record.url.clone();
                        move |_| url.clone()
                    })}
                    size={ButtonSize::Small}
                >
                    {"Open"}
                </Button>
                <Button
                    onclick={props.on_delete.reform(move |_| (group_index, tab_index))}
                    variant={ButtonVariant::Danger}
                    size={ButtonSize::Small}
                >
                    {"✗"}
                </Button>
            </div>
        </div>
    }
}

// Helper functions

/// Host shown under a tab card; falls back to the raw URL
fn display_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// Send one request to the background coordinator and wait for its reply
async fn send_request(request: Request) -> Result<(), String> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_host() {
        assert_eq!(display_host("https://www.google.com/search"), "www.google.com");
        assert_eq!(display_host("https://github.com/rust-lang/rust"), "github.com");
    }

    #[test]
    fn test_display_host_falls_back_to_raw_url() {
        assert_eq!(display_host("not-a-url"), "not-a-url");
        assert_eq!(display_host(""), "");
    }
}
