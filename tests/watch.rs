//! Watch mode driven by a scripted file watcher.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use common::*;
use kaba_scss::{FileEvent, FileEventKind, FileWatcher, KabaResult, MemorySink, WatchRequest};

/// Hands the event sender to the test instead of watching the disk
#[derive(Clone, Default)]
struct ChannelWatcher {
    sender: Arc<Mutex<Option<Sender<FileEvent>>>>,
    request: Arc<Mutex<Option<WatchRequest>>>,
    closed: Arc<AtomicBool>,
}

impl ChannelWatcher {
    fn wait_for_subscription(&self) {
        wait_until("watch subscription", || self.sender.lock().unwrap().is_some());
    }

    fn send(&self, event: FileEvent) {
        let sender = self.sender.lock().unwrap();
        sender.as_ref().expect("not subscribed").send(event).unwrap();
    }
}

impl FileWatcher for ChannelWatcher {
    fn subscribe(&mut self, request: &WatchRequest, events: Sender<FileEvent>) -> KabaResult<()> {
        *self.request.lock().unwrap() = Some(request.clone());
        *self.sender.lock().unwrap() = Some(events);
        Ok(())
    }

    fn close(&mut self) {
        *self.sender.lock().unwrap() = None;
        self.closed.store(true, Ordering::SeqCst);
    }
}

fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(10));
    }
}

fn builds_started(sink: &MemorySink) -> usize {
    sink.output().matches("Build started").count()
}

fn builds_finished(sink: &MemorySink) -> usize {
    sink.output().matches("Build finished").count()
}

#[test]
fn change_event_triggers_exactly_one_rebuild() {
    let project = TestProject::simple();
    let watcher = ChannelWatcher::default();
    let (mut session, sink) = project.session(project.options().with_watch(true));
    session.add_entry("fixtures/simple.scss", "dist", None);
    let session = Arc::new(session.with_watcher(Box::new(watcher.clone())));

    let runner = {
        let session = session.clone();
        thread::spawn(move || session.run())
    };

    watcher.wait_for_subscription();
    assert_eq!(builds_started(&sink), 1);

    let request = watcher.request.lock().unwrap().clone().unwrap();
    assert_eq!(request.dirs, vec![project.path("fixtures")]);
    assert_eq!(request.patterns.len(), 1);
    assert!(request.patterns[0].ends_with("/**/*.scss"));

    watcher.send(FileEvent::new(
        FileEventKind::Change,
        project.path("fixtures/simple.scss"),
    ));
    wait_until("rebuild", || builds_finished(&sink) == 2);
    assert!(session.is_watching());

    thread::sleep(Duration::from_millis(300));
    assert_eq!(builds_started(&sink), 2);

    session.stop();
    assert!(runner.join().unwrap().unwrap());
    assert!(watcher.closed.load(Ordering::SeqCst));
    assert!(!session.is_watching());

    thread::sleep(Duration::from_millis(200));
    assert_eq!(builds_started(&sink), 2);
    assert!(project.path("dist/simple.css").exists());
}

#[test]
fn burst_of_events_is_coalesced() {
    let project = TestProject::simple();
    let watcher = ChannelWatcher::default();
    let (mut session, sink) = project.session(project.options().with_watch(true));
    session.add_entry("fixtures/simple.scss", "dist", None);
    let session = Arc::new(session.with_watcher(Box::new(watcher.clone())));

    let runner = {
        let session = session.clone();
        thread::spawn(move || session.run())
    };
    watcher.wait_for_subscription();

    let path = project.path("fixtures/simple.scss");
    watcher.send(FileEvent::new(FileEventKind::Change, &path));
    watcher.send(FileEvent::new(FileEventKind::Unlink, &path));
    watcher.send(FileEvent::new(FileEventKind::Add, &path));
    wait_until("rebuild", || builds_finished(&sink) == 2);

    thread::sleep(Duration::from_millis(300));
    session.stop();
    runner.join().unwrap().unwrap();

    assert_eq!(builds_started(&sink), 2);
}

#[test]
fn changed_file_is_linted_before_rebuild() {
    let project = TestProject::simple();
    let watcher = ChannelWatcher::default();
    let (mut session, sink) = project.session(
        project
            .options()
            .with_watch(true)
            .with_lint(true),
    );
    session.add_entry("fixtures/simple.scss", "dist", None);
    let session = Arc::new(session.with_watcher(Box::new(watcher.clone())));

    let runner = {
        let session = session.clone();
        thread::spawn(move || session.run())
    };
    watcher.wait_for_subscription();
    assert!(!sink.output().contains("lint issues"));

    project.write("fixtures/simple.scss", LINT_ERRORS_SCSS);
    watcher.send(FileEvent::new(
        FileEventKind::Change,
        project.path("fixtures/simple.scss"),
    ));
    wait_until("rebuild", || builds_finished(&sink) == 2);

    session.stop();
    assert!(runner.join().unwrap().unwrap());

    let log = sink.output();
    assert_eq!(log.matches("lint issues").count(), 1, "{log}");
    let linted = log.find("lint issues").unwrap();
    let rebuilt = log.rfind("Build started").unwrap();
    assert!(linted < rebuilt, "{log}");
}

#[test]
fn stop_before_watching_returns_after_initial_build() {
    let project = TestProject::simple();
    let watcher = ChannelWatcher::default();
    let (mut session, sink) = project.session(project.options().with_watch(true));
    session.add_entry("fixtures/simple.scss", "dist", None);
    let session = session.with_watcher(Box::new(watcher.clone()));

    session.stop();
    assert!(session.run().unwrap());

    assert_eq!(builds_started(&sink), 1);
    assert!(watcher.closed.load(Ordering::SeqCst));
}
