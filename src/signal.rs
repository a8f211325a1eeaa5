//! Signal: a typed publish/subscribe list.
//!
//! Listeners are either persistent or one-shot. A handler is identified by
//! the allocation behind its [`Handler`], so registering a clone of the same
//! handler twice is a no-op.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::ptr;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Shared, identity-comparable callback receiving the dispatch payload.
pub struct Handler<A = ()>(Rc<dyn Fn(&A)>);

impl<A> Handler<A> {
    pub fn new(f: impl Fn(&A) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &A) {
        (self.0)(args)
    }

    /// True if both handles point at the same callback.
    pub fn same(&self, other: &Handler<A>) -> bool {
        ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

struct Listener<A> {
    handler: Handler<A>,
    once: bool,
}

/// Ordered list of listeners notified on [`Signal::dispatch`].
pub struct Signal<A = ()> {
    listeners: RefCell<Vec<Listener<A>>>,
}

impl<A> Default for Signal<A> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<A> Signal<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every future dispatch.
    ///
    /// Returns `false` without changing anything if the handler is already
    /// registered.
    pub fn add(&self, handler: &Handler<A>) -> bool {
        self.register(handler, false)
    }

    /// Registers `handler` for the next dispatch only.
    pub fn add_once(&self, handler: &Handler<A>) -> bool {
        self.register(handler, true)
    }

    fn register(&self, handler: &Handler<A>, once: bool) -> bool {
        if self.has(handler) {
            return false;
        }
        self.listeners.borrow_mut().push(Listener {
            handler: handler.clone(),
            once,
        });
        true
    }

    /// Invokes every listener registered when the dispatch starts, in
    /// registration order.
    ///
    /// One-shot listeners are unregistered as they fire. Listeners removed by
    /// an earlier handler in the same dispatch are skipped; listeners added
    /// during the dispatch wait for the next one.
    pub fn dispatch(&self, args: &A) {
        let snapshot: Vec<Handler<A>> = self
            .listeners
            .borrow()
            .iter()
            .map(|l| l.handler.clone())
            .collect();

        for handler in snapshot {
            // The borrow must be released before the handler runs, since it
            // may re-enter this signal.
            let live = {
                let mut listeners = self.listeners.borrow_mut();
                match listeners.iter().position(|l| l.handler.same(&handler)) {
                    Some(idx) if listeners[idx].once => {
                        listeners.remove(idx);
                        true
                    }
                    Some(_) => true,
                    None => false,
                }
            };
            if live {
                handler.call(args);
            }
        }
    }

    /// Unregisters the first listener matching `handler`. No-op if absent.
    pub fn remove(&self, handler: &Handler<A>) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(idx) = listeners.iter().position(|l| l.handler.same(handler)) {
            listeners.remove(idx);
        }
    }

    pub fn remove_all(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn has(&self, handler: &Handler<A>) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|l| l.handler.same(handler))
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl<A: 'static> Signal<A> {
    /// Registers a loosely typed value, which must be a `Handler<A>`.
    ///
    /// Hosts that keep callbacks behind `dyn Any` go through here; anything
    /// else (including `None`) is rejected with [`Error::NotCallable`].
    pub fn add_any(&self, value: Option<&dyn Any>) -> Result<bool> {
        Ok(self.add(downcast_handler(value)?))
    }

    /// One-shot variant of [`Signal::add_any`].
    pub fn add_once_any(&self, value: Option<&dyn Any>) -> Result<bool> {
        Ok(self.add_once(downcast_handler(value)?))
    }
}

fn downcast_handler<A: 'static>(value: Option<&dyn Any>) -> Result<&Handler<A>> {
    let value = value.ok_or(Error::NotCallable("nothing"))?;
    value
        .downcast_ref::<Handler<A>>()
        .ok_or(Error::NotCallable("a non-handler value"))
}

impl<A> fmt::Display for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[Signal]")
    }
}

impl<A> fmt::Debug for Signal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.len())
            .finish()
    }
}
