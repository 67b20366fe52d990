// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Spinner frame interval.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Routes files dropped on the window to the upload flow.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(iced::window::Event::FileDropped(path)) = event {
            return Some(Message::FileDropped(path));
        }
        None
    })
}

/// Drives the spinner while a file is processing or a request is in flight.
pub fn create_tick_subscription(busy: bool) -> Subscription<Message> {
    if busy {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
