type Hook = Box<dyn FnMut() + Send + 'static>;
type StopHook = Box<dyn FnMut(bool) + Send + 'static>;

/// Lifecycle handlers of a [`CountdownTimer`]. Each event holds at most one
/// handler; registering another one replaces it.
///
/// [`CountdownTimer`]: super::CountdownTimer
#[derive(Default)]
pub struct Callbacks {
    on_start: Option<Hook>,
    on_pause: Option<Hook>,
    on_resume: Option<Hook>,
    on_stop: Option<StopHook>,
}

impl Callbacks {
    pub fn set_on_start(&mut self, hook: Hook) {
        self.on_start = Some(hook);
    }

    pub fn set_on_pause(&mut self, hook: Hook) {
        self.on_pause = Some(hook);
    }

    pub fn set_on_resume(&mut self, hook: Hook) {
        self.on_resume = Some(hook);
    }

    pub fn set_on_stop(&mut self, hook: StopHook) {
        self.on_stop = Some(hook);
    }

    pub fn started(&mut self) {
        if let Some(hook) = self.on_start.as_mut() {
            hook();
        }
    }

    pub fn paused(&mut self) {
        if let Some(hook) = self.on_pause.as_mut() {
            hook();
        }
    }

    pub fn resumed(&mut self) {
        if let Some(hook) = self.on_resume.as_mut() {
            hook();
        }
    }

    /// `finished` is `true` only when the countdown ran out by itself.
    pub fn stopped(&mut self, finished: bool) {
        if let Some(hook) = self.on_stop.as_mut() {
            hook(finished);
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_pause", &self.on_pause.is_some())
            .field("on_resume", &self.on_resume.is_some())
            .field("on_stop", &self.on_stop.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    #[test]
    fn callbacks_last_write_wins() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut callbacks = Callbacks::default();

        let first = Arc::clone(&calls);
        callbacks.set_on_start(Box::new(move || first.lock().unwrap().push("first")));
        let second = Arc::clone(&calls);
        callbacks.set_on_start(Box::new(move || second.lock().unwrap().push("second")));

        callbacks.started();
        assert_eq!(*calls.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn callbacks_empty_slots() {
        let mut callbacks = Callbacks::default();
        callbacks.started();
        callbacks.paused();
        callbacks.resumed();
        callbacks.stopped(true);
        assert_eq!(
            format!("{callbacks:?}"),
            "Callbacks { on_start: false, on_pause: false, on_resume: false, on_stop: false }"
        );
    }
}
