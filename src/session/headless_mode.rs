//! Headless mode execution

use super::{
    SessionData,
    messages::{
        frame_lines, print_session_exit_success, print_session_shutdown, print_session_starting,
    },
};
use std::error::Error;

/// Runs the dashboard without a terminal UI
///
/// Displayable events and every rendered frame are printed line by line
/// until Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.endpoints);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();

    // Headless sessions never navigate; keep the sender alive so the
    // scheduler keeps running.
    let _command_sender = session.command_sender;

    loop {
        tokio::select! {
            event = session.event_receiver.recv() => match event {
                Some(event) => {
                    if let Some(frame) = &event.frame {
                        for line in frame_lines(frame) {
                            println!("{}", line);
                        }
                    } else if event.should_display() {
                        println!("{}", event);
                    }
                }
                None => break,
            },
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    // The scheduler may be waiting on a full channel; closing it lets the send fail.
    drop(session.event_receiver);
    let _ = session.join_handle.await;
    print_session_exit_success();

    Ok(())
}
