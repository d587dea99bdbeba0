/*!
Puts an fnbench function on the network.

The server speaks a small request/response RPC over HTTP/1.1: every method
is a `POST /<service>/<method>` with a JSON message as body. Two services
are exposed on one address:

- `fnbench.Function` with the single `Invoke` method,
- `fnbench.reflection.ServerReflection` with `ListServices` and
  `DescribeService`, so generic clients can discover the shape of the server.

Calls are served by a fixed pool of worker threads pulling from one
listener. A call runs to completion on its worker; calls beyond the pool
size wait in the listener queue.

```no_run
use fnbench_server::{Server, ServerConfig};
use fnbench_workloads::{WorkloadKind, WorkloadSpec};

let spec = WorkloadSpec::new(WorkloadKind::Classify);
let server = Server::start(ServerConfig::from_env()?, || spec.initialize())?;

let shutdown = server.shutdown_handle();
// hand `shutdown` to a signal handler ...
# shutdown.trigger();
let report = server.wait();
println!("{}", report);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

#![warn(rust_2018_idioms)]

mod config;
mod endpoint;
mod error;
mod lifecycle;
pub mod reflection;
pub mod wire;

pub use config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_WORKERS, PORT_ENV};
pub use endpoint::{Endpoint, Reply};
#[doc(inline)]
pub use error::StartupError;
pub use lifecycle::{RunningServer, Server, ShutdownHandle};
