//! Messaging: conversation list, one thread, and a reply box.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/messages` and `/messages/:user_id` behind the route guard
//! (`messages.access`). Opening a thread marks it read on the server and
//! clears its unread badge locally.

#[cfg(test)]
#[path = "messages_test.rs"]
mod messages_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use marketplace::fetch::FetchClient;
use marketplace::models::{ConversationSummary, Message};
use marketplace::{Notice, routes};

use crate::state::auth::AuthSignals;

const LOAD_FAILED: &str = "Messages could not be loaded.";
const SEND_FAILED: &str = "Your message could not be sent.";
const DELETE_FAILED: &str = "The message could not be deleted.";

/// Whether `message` was sent by the signed-in user.
pub fn is_own(message: &Message, me: Option<&str>) -> bool {
    me.is_some_and(|id| message.sender_id == id)
}

/// Display name of the other participant in conversation `user_id`.
pub fn partner_name(conversations: &[ConversationSummary], user_id: &str) -> String {
    conversations
        .iter()
        .find(|c| c.user_id == user_id)
        .map_or_else(|| "Conversation".to_owned(), |c| c.username.clone())
}

/// Clear the unread badge of conversation `user_id`; returns how many were cleared.
pub fn mark_read_locally(conversations: &mut [ConversationSummary], user_id: &str) -> u32 {
    conversations
        .iter_mut()
        .find(|c| c.user_id == user_id)
        .map_or(0, |c| std::mem::take(&mut c.unread_count))
}

/// Conversation link path.
pub fn thread_href(user_id: &str) -> String {
    format!("{}/{}", routes::MESSAGES, user_id)
}

#[component]
pub fn MessagesPage() -> impl IntoView {
    let fetch = expect_context::<FetchClient>();
    let auth = expect_context::<AuthSignals>();
    let params = use_params_map();

    let selected = Memo::new(move |_| params.with(|p| p.get("user_id")));
    let me = Memo::new(move |_| auth.snapshot.with(|s| s.user.as_ref().map(|u| u.id.clone())));
    let conversations = RwSignal::new(Vec::<ConversationSummary>::new());
    let unread = RwSignal::new(0_u32);
    let thread = RwSignal::new(Vec::<Message>::new());
    let draft = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let sending = RwSignal::new(false);

    let notify_error = move |message: String| {
        auth.toasts.update(|t| {
            t.push(Notice::error(message));
        });
    };

    #[cfg(feature = "hydrate")]
    {
        let fetch = fetch.clone();
        leptos::task::spawn_local(async move {
            let (list, count) = futures::future::join(fetch.conversations(), fetch.unread_count()).await;
            match list {
                Ok(list) => conversations.set(list),
                Err(e) => {
                    log::warn!("messages: conversations failed: {e}");
                    error.set(Some(LOAD_FAILED.to_owned()));
                }
            }
            match count {
                Ok(count) => unread.set(count),
                Err(e) => log::debug!("messages: unread count failed: {e}"),
            }
        });
    }

    let fetch_thread = fetch.clone();
    Effect::new(move || {
        let Some(user_id) = selected.get() else {
            thread.set(Vec::new());
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let fetch = fetch_thread.clone();
            leptos::task::spawn_local(async move {
                match fetch.conversation(&user_id).await {
                    Ok(messages) => thread.set(messages),
                    Err(e) => {
                        log::warn!("messages: thread {user_id} failed: {e}");
                        error.set(Some(LOAD_FAILED.to_owned()));
                        return;
                    }
                }
                match fetch.mark_conversation_read(&user_id).await {
                    Ok(()) => {
                        let mut cleared = 0;
                        conversations.update(|list| cleared = mark_read_locally(list, &user_id));
                        unread.update(|n| *n = n.saturating_sub(cleared));
                    }
                    Err(e) => log::debug!("messages: mark read failed: {e}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&fetch_thread, user_id, LOAD_FAILED);
        }
    });

    let fetch_send = fetch.clone();
    let on_send = Callback::new(move |()| {
        let Some(receiver) = selected.get() else {
            return;
        };
        let content = draft.get().trim().to_owned();
        if content.is_empty() || sending.get() {
            return;
        }
        sending.set(true);
        #[cfg(feature = "hydrate")]
        {
            let fetch = fetch_send.clone();
            leptos::task::spawn_local(async move {
                match fetch.send_message(&receiver, &content).await {
                    Ok(message) => {
                        thread.update(|t| t.push(message));
                        draft.set(String::new());
                    }
                    Err(e) => notify_error(e.user_message(SEND_FAILED)),
                }
                sending.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&fetch_send, receiver, content, SEND_FAILED);
        }
    });

    let on_delete = Callback::new(move |message_id: String| {
        #[cfg(feature = "hydrate")]
        {
            let fetch = fetch.clone();
            leptos::task::spawn_local(async move {
                match fetch.delete_message(&message_id).await {
                    Ok(()) => thread.update(|t| t.retain(|m| m.id != message_id)),
                    Err(e) => notify_error(e.user_message(DELETE_FAILED)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&fetch, message_id, DELETE_FAILED, notify_error);
        }
    });

    view! {
        <div class="messages-page">
            <aside class="conversation-list">
                <h2>
                    "Messages"
                    <Show when=move || { unread.get() > 0 }>
                        <span class="badge">{move || unread.get()}</span>
                    </Show>
                </h2>
                <Show when=move || error.get().is_some()>
                    <p class="messages-page__error" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show
                    when=move || !conversations.with(Vec::is_empty)
                    fallback=|| view! { <p class="conversation-list__empty">"No conversations yet."</p> }
                >
                    <ul>
                        <For each=move || conversations.get() key=|c| (c.user_id.clone(), c.unread_count) let:conversation>
                            <li
                                class="conversation-list__item"
                                class:conversation-list__item--active={
                                    let id = conversation.user_id.clone();
                                    move || selected.get().as_deref() == Some(id.as_str())
                                }
                            >
                                <A href=thread_href(&conversation.user_id)>
                                    <span class="conversation-list__name">{conversation.username.clone()}</span>
                                    <span class="conversation-list__preview">{conversation.last_message.clone()}</span>
                                    {(conversation.unread_count > 0)
                                        .then(|| view! { <span class="badge">{conversation.unread_count}</span> })}
                                </A>
                            </li>
                        </For>
                    </ul>
                </Show>
            </aside>

            <section class="thread">
                <Show
                    when=move || selected.get().is_some()
                    fallback=|| view! { <p class="thread__placeholder">"Select a conversation."</p> }
                >
                    <h2 class="thread__title">
                        {move || conversations.with(|list| partner_name(list, &selected.get().unwrap_or_default()))}
                    </h2>
                    <ol class="thread__messages">
                        <For each=move || thread.get() key=|m| m.id.clone() let:message>
                            {
                                let own = is_own(&message, me.get_untracked().as_deref());
                                let id = message.id.clone();
                                view! {
                                    <li class="thread__message" class:thread__message--own=own>
                                        <p>{message.content.clone()}</p>
                                        <time>{message.created_at.clone()}</time>
                                        <Show when=move || own>
                                            <button
                                                class="thread__delete"
                                                aria-label="Delete message"
                                                on:click={
                                                    let id = id.clone();
                                                    move |_| on_delete.run(id.clone())
                                                }
                                            >
                                                "✕"
                                            </button>
                                        </Show>
                                    </li>
                                }
                            }
                        </For>
                    </ol>
                    <form
                        class="thread__reply"
                        on:submit=move |ev: leptos::ev::SubmitEvent| {
                            ev.prevent_default();
                            on_send.run(());
                        }
                    >
                        <textarea
                            class="thread__input"
                            placeholder="Write a message"
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                        ></textarea>
                        <button class="auth-button" type="submit" disabled=move || sending.get()>"Send"</button>
                    </form>
                </Show>
            </section>
        </div>
    }
}
