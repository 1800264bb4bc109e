pub mod aggregator;
pub mod clock;
pub mod dispatch;
pub mod events;
pub mod registry;
pub mod storage;

#[cfg(feature = "server")]
pub mod relay;


use dioxus::prelude::*;

/// Live telemetry, one text item per relayed message.
#[server(output = StreamingText)]
pub async fn telemetry_events() -> Result<dioxus::fullstack::TextStream, ServerFnError> {
    relay::start_ingest_listener();

    let rx = relay::channel().subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(msg) => return Some((msg, rx)),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Dashboard stream lagged, skipped {} message(s)", skipped);
                    continue;
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Ok(dioxus::fullstack::TextStream::new(stream))
}

/// Push endpoint for bridges that cannot hold the ingest socket open.
#[server]
pub async fn publish_telemetry(message: String) -> Result<(), ServerFnError> {
    if relay::publish(relay::channel(), &message) {
        Ok(())
    } else {
        Err(ServerFnError::new("malformed telemetry message"))
    }
}

fn page_visible() -> bool {
    #[cfg(feature = "web")]
    {
        web_sys::window()
            .and_then(|w| w.document())
            .map(|d| !d.hidden())
            .unwrap_or(true)
    }
    #[cfg(not(feature = "web"))]
    {
        true
    }
}

/// Subscribe to the relay while the page is visible, reconnecting after a
/// dropped stream.
pub fn use_telemetry_handler(
    on_message: impl FnMut(String) + 'static,
    on_error: impl FnMut(String) + 'static,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    let on_message = Rc::new(RefCell::new(on_message));
    let on_error = Rc::new(RefCell::new(on_error));

    let mut is_visible = use_signal(page_visible);

    let _listener = use_hook(|| {
        #[cfg(feature = "web")]
        {
            web_sys::window()
                .and_then(|w| w.document())
                .map(|document| {
                    Rc::new(gloo_events::EventListener::new(
                        &document,
                        "visibilitychange",
                        move |_| is_visible.set(page_visible()),
                    ))
                })
        }
        #[cfg(not(feature = "web"))]
        {
            None::<Rc<()>>
        }
    });

    use_resource(move || {
        let on_message = on_message.clone();
        let on_error = on_error.clone();
        let visible = is_visible();

        async move {
            if !visible {
                return;
            }

            loop {
                match telemetry_events().await {
                    Ok(mut stream) => {
                        while let Some(Ok(message)) = stream.next().await {
                            let mut handler = on_message.borrow_mut();
                            (*handler)(message);
                        }
                        tracing::info!("Telemetry stream ended, reconnecting");
                    }
                    Err(e) => {
                        let mut handler = on_error.borrow_mut();
                        (*handler)(e.to_string());
                    }
                }
                gloo_timers::future::TimeoutFuture::new(crate::config::RECONNECT_DELAY_MS).await;

                if !page_visible() {
                    break;
                }
            }
        }
    });
}
