pub mod dispatch_cycle;
