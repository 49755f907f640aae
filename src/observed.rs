use std::pin::pin;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use async_executor::LocalExecutor;

use crate::error::TiltError;

#[derive(Debug)]
enum ObservedEvent<T: Send> {
    Changed(T),
}

pub type ObserverPtr<T> = Box<dyn FnMut(&T) + Send>;

/// Observable value with a single writer.
///
/// Observers either poll the current value through an [`ObservedReader`]
/// or attach a callback. Callbacks never run on the writer's thread:
/// every `set` is handed off over a channel to the var's own dispatch
/// thread, which invokes handlers one at a time in publish order. The
/// dispatch thread exits once the var is dropped.
pub struct ObservedVar<T: Send> {
    value: T,
    handlers: Arc<Mutex<Vec<ObserverPtr<T>>>>,
    tx: Sender<ObservedEvent<T>>,
}

impl<T: Clone + Send + 'static> ObservedVar<T> {
    pub fn new(value: T) -> Arc<Mutex<Self>> {
        let (tx, rx) = mpsc::channel::<ObservedEvent<T>>();
        let handlers: Arc<Mutex<Vec<ObserverPtr<T>>>> = Arc::new(Mutex::new(Vec::new()));
        let me = Arc::new(Mutex::new(Self { value, handlers: handlers.clone(), tx }));
        Self::setup(rx, handlers);
        me
    }

    fn setup(rx: Receiver<ObservedEvent<T>>, handlers: Arc<Mutex<Vec<ObserverPtr<T>>>>) {
        async fn updater<T: Send>(
            _executor: &LocalExecutor<'_>,
            rx: Receiver<ObservedEvent<T>>,
            handlers: Arc<Mutex<Vec<ObserverPtr<T>>>>,
        ) {
            loop {
                match rx.recv() {
                    Ok(ObservedEvent::Changed(value)) => {
                        for handler in handlers.lock().unwrap().iter_mut() {
                            handler(&value);
                        }
                    }
                    // Writer dropped, nothing left to dispatch.
                    Err(_) => break,
                }
            }
        }

        if let Err(e) = thread::Builder::new()
            .name("observed-dispatch".into())
            .spawn(move || {
                let executor = LocalExecutor::new();
                let fut = &mut pin!(updater(&executor, rx, handlers));
                async_io::block_on(executor.run(fut));
            })
        {
            log::error!("ObservedVar: dispatch thread: {}", e);
        }
    }

    pub fn add_handler(&mut self, handler: ObserverPtr<T>) {
        self.handlers.lock().unwrap().push(handler);
    }

    /// Store the value and queue it for the dispatch thread.
    pub fn set(&mut self, value: T) -> Result<(), TiltError> {
        self.value = value.clone();
        self.tx
            .send(ObservedEvent::Changed(value))
            .map_err(|_| TiltError::Publish)?;
        Ok(())
    }

    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Read-only handle for observers.
    pub fn reader(me: &Arc<Mutex<Self>>) -> ObservedReader<T> {
        ObservedReader(me.clone())
    }
}

/// Observer-side handle: read the current value or subscribe a callback,
/// without any way to write.
pub struct ObservedReader<T: Send>(Arc<Mutex<ObservedVar<T>>>);

impl<T: Clone + Send + 'static> ObservedReader<T> {
    pub fn get(&self) -> T {
        self.0.lock().unwrap().get()
    }

    pub fn subscribe(&self, handler: ObserverPtr<T>) {
        self.0.lock().unwrap().add_handler(handler);
    }
}

impl<T: Send> Clone for ObservedReader<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn set_updates_value_synchronously() {
        let var = ObservedVar::new(0i32);
        var.lock().unwrap().set(5).unwrap();
        assert_eq!(var.lock().unwrap().get(), 5);
    }

    #[test]
    fn handlers_see_changes_in_order() {
        let var = ObservedVar::new(0i32);
        let (tx, rx) = mpsc::channel();
        ObservedVar::reader(&var).subscribe(Box::new(move |value| {
            tx.send(*value).unwrap();
        }));

        for n in [1, 2, 3] {
            var.lock().unwrap().set(n).unwrap();
        }

        for n in [1, 2, 3] {
            assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), n);
        }
    }

    #[test]
    fn reader_clones_share_the_var() {
        let var = ObservedVar::new(String::from("idle"));
        let reader = ObservedVar::reader(&var);
        let other = reader.clone();
        var.lock().unwrap().set(String::from("running")).unwrap();
        assert_eq!(reader.get(), "running");
        assert_eq!(other.get(), "running");
    }
}
