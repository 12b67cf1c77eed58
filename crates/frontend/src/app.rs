//! Single-page login form with the token-expiry countdown and the
//! interceptor toggle

use crate::client;
use crate::services::AuthService;
use gloo::timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use wicket_core::{Countdown, SessionUser, Tick};
use yew::prelude::*;

/// Start the one-shot expiry countdown, replacing any running one.
///
/// The previous interval is dropped (cancelled) before the new schedule is
/// created, so two logins never leave two timers ticking.
fn start_countdown(
    minutes: u32,
    seconds: UseStateHandle<u32>,
    user: UseStateHandle<Option<SessionUser>>,
    error: UseStateHandle<Option<String>>,
    interval_handle: Rc<RefCell<Option<Interval>>>,
) {
    interval_handle.borrow_mut().take();

    let countdown = Rc::new(RefCell::new(Countdown::from_minutes(minutes)));
    seconds.set(countdown.borrow().remaining());

    let handle = interval_handle.clone();
    let interval = Interval::new(1_000, move || match countdown.borrow_mut().tick() {
        Tick::Running(remaining) => seconds.set(remaining),
        Tick::Expired => {
            seconds.set(0);
            // The countdown cancels its own schedule at zero
            handle.borrow_mut().take();

            let user = user.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match AuthService::new().current_user().await {
                    Ok(current) => {
                        error.set(None);
                        user.set(Some(current));
                    }
                    Err(message) => error.set(Some(message)),
                }
            });
        }
        Tick::Stopped => {}
    });

    *interval_handle.borrow_mut() = Some(interval);
}

#[function_component(App)]
pub fn app() -> Html {
    let username = use_state(|| "emilys".to_string());
    let password = use_state(|| "emilyspass".to_string());
    let timeout_mins = use_state(String::new);
    let seconds = use_state(|| 0u32);
    let user = use_state(|| Option::<SessionUser>::None);
    let error = use_state(|| Option::<String>::None);
    let intercept = use_state(|| false);
    let interval_handle = use_mut_ref(|| Option::<Interval>::None);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_timeout_input = {
        let timeout_mins = timeout_mins.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            timeout_mins.set(input.value());
        })
    };

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let timeout_mins = timeout_mins.clone();
        let seconds = seconds.clone();
        let user = user.clone();
        let error = error.clone();
        let interval_handle = interval_handle.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Ok(minutes) = timeout_mins.trim().parse::<u32>() else {
                error.set(Some(
                    "Token timeout must be a whole number of minutes".to_string(),
                ));
                return;
            };

            let username_value = (*username).clone();
            let password_value = (*password).clone();
            let seconds = seconds.clone();
            let user = user.clone();
            let error = error.clone();
            let interval_handle = interval_handle.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let service = AuthService::new();
                match service.login(username_value, password_value, minutes).await {
                    Ok(()) => {
                        error.set(None);
                        match service.current_user().await {
                            Ok(current) => user.set(Some(current)),
                            Err(message) => error.set(Some(message)),
                        }
                        start_countdown(minutes, seconds, user, error, interval_handle);
                    }
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let on_activate = {
        let intercept = intercept.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            if *intercept {
                return;
            }
            match client::activate_interceptor() {
                Ok(()) => intercept.set(true),
                Err(activation_error) => error.set(Some(activation_error.to_string())),
            }
        })
    };

    html! {
        <div class="flex gap-24 p-8">
            <form onsubmit={onsubmit} class="flex flex-col w-[20rem]">
                <div>
                    <div class="flex flex-col mb-4 gap-1">
                        <label class="text-sm text-gray-500" for="username">
                            {"Username"}
                        </label>
                        <input
                            class="border p-2 rounded-md"
                            type="text"
                            id="username"
                            value={(*username).clone()}
                            oninput={on_username_input}
                        />
                    </div>

                    <div class="flex flex-col mb-6 gap-1">
                        <label class="text-sm text-gray-500" for="password">
                            {"Password"}
                        </label>
                        <input
                            class="border p-2 rounded-md"
                            type="password"
                            id="password"
                            value={(*password).clone()}
                            oninput={on_password_input}
                        />
                    </div>

                    <div class="flex flex-col mb-6 gap-1">
                        <label class="text-sm text-gray-500" for="token-timeout">
                            {"Token Timeout (In mins)"}
                        </label>
                        <input
                            class="border p-2 rounded-md"
                            type="number"
                            id="token-timeout"
                            value={(*timeout_mins).clone()}
                            oninput={on_timeout_input}
                        />
                    </div>
                </div>
                <button class="bg-gray-900 text-white py-2 rounded-md" type="submit">
                    {"Login"}
                </button>
            </form>

            <div class="flex flex-col justify-between">
                <div>
                    <h1 class="mb-1 text-md underline">{"Token Status"}</h1>
                    <p class="mb-6 text-gray-400">
                        {format!("Token expires in: {}s", *seconds)}
                    </p>

                    {match (&*error, &*user) {
                        (Some(message), _) => html! {
                            <span class="text-red-600">{message.clone()}</span>
                        },
                        (None, Some(current)) => html! {
                            <>
                                <span class="text-xs bg-green-500 mb-1 text-white p-1 px-2 rounded-full">
                                    {"Active User"}
                                </span>
                                <h1 class="text-lg font-medium">{current.display_name()}</h1>
                            </>
                        },
                        (None, None) => html! {},
                    }}
                </div>
                <button
                    class={classes!(
                        if *intercept { "bg-green-600" } else { "bg-gray-400" },
                        "text-white",
                        "py-2",
                        "px-6",
                        "rounded-md"
                    )}
                    onclick={on_activate}
                >
                    {"Activate Interceptor"}
                </button>
            </div>
        </div>
    }
}
