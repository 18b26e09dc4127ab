use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use libpulse_binding::callbacks::ListResult;
use libpulse_binding::context::introspect::{Introspector, SinkInfo};
use libpulse_binding::context::{Context, FlagSet};
use libpulse_binding::error::PAErr;
use libpulse_binding::mainloop::standard::{IterateResult, Mainloop};
use libpulse_binding::operation::Operation;
use libpulse_binding::proplist::{properties, Proplist};
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::error::PulseError;
use crate::sink::SinkRecord;

use super::connection::{request_step, step, ConnectionStep};
use super::{AudioServer, ServerInfo, APPLICATION_NAME};

/// How long to sleep when a mainloop iteration had nothing to dispatch
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Why a sink enumeration stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListFailure {
    OutOfMemory,
    Server,
}

/// Sinks gathered so far, or the reason gathering stopped
type Collected = Result<Vec<SinkRecord>, ListFailure>;

/// Fold one enumeration callback into the collected sinks
fn accumulate(collected: &mut Collected, item: ListResult<SinkRecord>) {
    accumulate_with(collected, item, |list| list.try_reserve(1).is_ok());
}

/// `accumulate` with the room-making step supplied by the caller
///
/// Once the enumeration has failed, later records are ignored.
fn accumulate_with<F>(collected: &mut Collected, item: ListResult<SinkRecord>, reserve: F)
where
    F: FnOnce(&mut Vec<SinkRecord>) -> bool,
{
    let Ok(list) = collected.as_mut() else {
        return;
    };
    match item {
        ListResult::Item(sink) => {
            if !reserve(list) {
                *collected = Err(ListFailure::OutOfMemory);
                return;
            }
            list.push(sink);
        }
        ListResult::End => {}
        ListResult::Error => *collected = Err(ListFailure::Server),
    }
}

/// Turn a finished enumeration into its reply; `errno` is the context's last error
fn into_sinks(collected: Collected, errno: PAErr) -> Result<Vec<SinkRecord>, PulseError> {
    match collected {
        Ok(list) => {
            debug!(count = list.len(), "Enumerated sinks");
            Ok(list)
        }
        Err(ListFailure::OutOfMemory) => Err(PulseError::OutOfMemory),
        Err(ListFailure::Server) => Err(PulseError::request("list sinks", errno)),
    }
}

/// Connection to a PulseAudio server driven by the standard mainloop
///
/// Fields drop in declaration order, so the context is released before the
/// mainloop it was created on.
pub struct PulseServer {
    introspector: Introspector,
    context: Context,
    mainloop: Mainloop,
}

impl PulseServer {
    /// Connect and wait until the context is ready
    ///
    /// `server` is passed straight to libpulse; `None` uses the client defaults.
    #[instrument]
    pub async fn connect(server: Option<&str>) -> Result<Self, PulseError> {
        info!("Connecting to audio server");

        let mut proplist = Proplist::new().ok_or(PulseError::Init("proplist"))?;
        proplist
            .set_str(properties::APPLICATION_NAME, APPLICATION_NAME)
            .map_err(|_| PulseError::Init("proplist"))?;

        let mainloop = Mainloop::new().ok_or(PulseError::Init("mainloop"))?;
        let mut context = Context::new_with_proplist(&mainloop, APPLICATION_NAME, &proplist)
            .ok_or(PulseError::Init("context"))?;
        let introspector = context.introspect();

        // From here on Drop disconnects on every exit path
        let mut server_conn = Self {
            introspector,
            context,
            mainloop,
        };

        server_conn
            .context
            .connect(server, FlagSet::NOFLAGS, None)
            .map_err(|e| PulseError::Connect {
                code: e.0,
                message: format!("{}", e),
            })?;

        server_conn.wait_until_ready().await?;
        info!("Connected to audio server");
        Ok(server_conn)
    }

    async fn wait_until_ready(&mut self) -> Result<(), PulseError> {
        let mut last = self.context.get_state();
        loop {
            let state = self.context.get_state();
            if state != last {
                debug!(?state, "Connection state changed");
                last = state;
            }

            match step(state).check()? {
                ConnectionStep::Ready => return Ok(()),
                _ => self.iterate().await?,
            }
        }
    }

    /// Run one non-blocking mainloop iteration, yielding to the runtime
    async fn iterate(&mut self) -> Result<(), PulseError> {
        match self.mainloop.iterate(false) {
            IterateResult::Success(0) => sleep(POLL_INTERVAL).await,
            IterateResult::Success(_) => tokio::task::yield_now().await,
            IterateResult::Quit(retval) => return Err(PulseError::Quit(retval.0)),
            IterateResult::Err(e) => return Err(PulseError::Iterate(e)),
        }
        Ok(())
    }

    /// Keep the mainloop running until `operation` completes
    async fn wait_for<G: ?Sized>(
        &mut self,
        op: Operation<G>,
        name: &'static str,
    ) -> Result<(), PulseError> {
        loop {
            self.iterate().await?;
            if request_step(self.context.get_state(), op.get_state(), name)? {
                return Ok(());
            }
        }
    }
}

#[async_trait(?Send)]
impl AudioServer for PulseServer {
    #[instrument(skip(self))]
    async fn sinks(&mut self) -> Result<Vec<SinkRecord>, PulseError> {
        let collected: Rc<RefCell<Collected>> = Rc::new(RefCell::new(Ok(Vec::new())));
        let collected_ref = Rc::clone(&collected);

        let op = self
            .introspector
            .get_sink_info_list(move |result: ListResult<&SinkInfo>| {
                let item = match result {
                    ListResult::Item(info) => ListResult::Item(SinkRecord::from(info)),
                    ListResult::End => ListResult::End,
                    ListResult::Error => ListResult::Error,
                };
                accumulate(&mut collected_ref.borrow_mut(), item);
            });
        self.wait_for(op, "list sinks").await?;

        let result = collected.replace(Ok(Vec::new()));
        into_sinks(result, self.context.errno())
    }

    #[instrument(skip(self))]
    async fn server_info(&mut self) -> Result<ServerInfo, PulseError> {
        let info: Rc<RefCell<Option<ServerInfo>>> = Rc::new(RefCell::new(None));
        let info_ref = Rc::clone(&info);

        let op = self.introspector.get_server_info(move |res| {
            info_ref.borrow_mut().replace(ServerInfo::from(res));
        });
        self.wait_for(op, "query server info").await?;

        let result = info.borrow_mut().take();
        match result {
            Some(info) => {
                debug!(
                    server = info.server_name.as_deref().unwrap_or("unknown"),
                    version = info.server_version.as_deref().unwrap_or("unknown"),
                    default_sink = info.default_sink_name.as_deref().unwrap_or("<none>"),
                    "Fetched server info"
                );
                Ok(info)
            }
            None => Err(PulseError::request("query server info", self.context.errno())),
        }
    }

    #[instrument(skip(self))]
    async fn set_default_sink(&mut self, name: &str) -> Result<(), PulseError> {
        let success = Rc::new(Cell::new(None));
        let success_ref = Rc::clone(&success);

        let op = self
            .context
            .set_default_sink(name, move |ok| success_ref.set(Some(ok)));
        self.wait_for(op, "switch default sink").await?;

        match success.get() {
            Some(true) => Ok(()),
            _ => Err(PulseError::request("switch default sink", self.context.errno())),
        }
    }
}

impl Drop for PulseServer {
    fn drop(&mut self) {
        debug!("Disconnecting from audio server");
        self.context.disconnect();
    }
}
