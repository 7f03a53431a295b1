// SPDX-License-Identifier: AGPL-3.0-or-later

//! `AccessCore`: the struct bundling the Session Table, Timer Service, and
//! downstream clients that both `tonic` service implementations hold an
//! `Arc` to.

use std::sync::Arc;

use crate::{
    delivery::DeliveryEngine,
    downstream::{DbproxyClient, LogicClient},
    heartbeat::HeartbeatSupervisor,
    ingress::Ingress,
    lifecycle::SessionLifecycle,
    session::table::SessionTable,
    shutdown::ShutdownDrain,
    timer::TimerService,
};

pub struct AccessCore {
    pub table: Arc<SessionTable>,
    pub heartbeat: Arc<HeartbeatSupervisor>,
    pub delivery: Arc<DeliveryEngine>,
    pub ingress: Ingress,
    pub lifecycle: SessionLifecycle,
    pub logic: LogicClient,
    pub shutdown: ShutdownDrain,
    /// This node's own dial-back address, recorded with dbproxy on sign-in
    /// so the logic tier knows where to push messages for this user.
    pub self_addr: String,
}

impl AccessCore {
    pub fn new(
        shard_count: usize,
        heartbeat_timeout: std::time::Duration,
        logic: LogicClient,
        dbproxy: DbproxyClient,
        self_addr: String,
    ) -> Arc<Self> {
        let table = Arc::new(SessionTable::new(shard_count));
        let timers = TimerService::new();
        let heartbeat = Arc::new(HeartbeatSupervisor::new(table.clone(), timers, heartbeat_timeout));
        let delivery = Arc::new(DeliveryEngine::new(table.clone(), heartbeat.clone()));
        let ingress = Ingress::new(delivery.clone());
        let lifecycle = SessionLifecycle::new(table.clone(), heartbeat.clone(), dbproxy);

        Arc::new(Self {
            table,
            heartbeat,
            delivery,
            ingress,
            lifecycle,
            logic,
            shutdown: ShutdownDrain::new(),
            self_addr,
        })
    }
}
