// Copyright 2023 Bitwise IO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The tokio runtime around [`CoordinatorAlgorithm`].
//!
//! A [`Coordinator`] is bound to two outbound channels, one for [`CanCommit`] polls and one for
//! [`Decision`]s, and owns two bounded inbound channels for [`Vote`]s and [`Ack`]s. Calling
//! [`Coordinator::start`] sends the polls and spawns the decision loop, a single task which is the
//! only reader and writer of the vote tally.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::algorithm::Algorithm;
use crate::error::{CoordinatorError, InternalError, InvalidArgumentError, InvalidStateError};
use crate::message::Message;

use super::coordinator_builder::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_STARTUP_DELAY};
use super::Ack;
use super::CanCommit;
use super::CoordinatorAction;
use super::CoordinatorActionNotification;
use super::CoordinatorAlgorithm;
use super::CoordinatorContext;
use super::CoordinatorEvent;
use super::CoordinatorState;
use super::Decision;
use super::Outcome;
use super::Vote;
use super::WorkerId;

/// A snapshot of the decision loop's progress, published after every message it handles.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoordinatorStatus {
    /// Whether `start` has launched the decision loop.
    pub started: bool,
    pub state: CoordinatorState,
    /// Number of votes in the tally.
    pub votes_received: usize,
    pub acks_received: usize,
    /// Votes which arrived after the tally was full.
    pub messages_dropped: usize,
}

impl Default for CoordinatorStatus {
    fn default() -> Self {
        CoordinatorStatus {
            started: false,
            state: CoordinatorState::Collecting,
            votes_received: 0,
            acks_received: 0,
            messages_dropped: 0,
        }
    }
}

async fn send_message<M: Message>(
    sender: &mpsc::Sender<M>,
    message: M,
    channel: &str,
) -> Result<(), CoordinatorError> {
    sender
        .send(message)
        .await
        .map_err(|_| CoordinatorError::channel_closed(channel))
}

/// Publishes the outcome of a round on the caller's result channel.
///
/// # Errors
///
/// Returns [`CoordinatorError::InvalidState`] if the receiving half has been dropped.
pub async fn send_final_decision(
    final_decision_sender: &mpsc::Sender<Outcome>,
    outcome: Outcome,
) -> Result<(), CoordinatorError> {
    final_decision_sender
        .send(outcome)
        .await
        .map_err(|_| CoordinatorError::channel_closed("final decision"))
}

/// The inbound half of a coordinator: votes and acks from any number of concurrent callers.
#[derive(Clone, Debug)]
pub struct CoordinatorHandle {
    vote_sender: mpsc::Sender<Vote>,
    ack_sender: mpsc::Sender<Ack>,
}

impl CoordinatorHandle {
    /// Queues a vote for the decision loop, waiting only if the vote channel is full.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::InvalidState`] once the decision loop has stopped.
    pub async fn deliver_vote(&self, vote: Vote) -> Result<(), CoordinatorError> {
        send_message(&self.vote_sender, vote, "vote").await
    }

    /// Queues an ack for the decision loop, waiting only if the ack channel is full.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::InvalidState`] once the decision loop has stopped.
    pub async fn deliver_ack(&self, ack: Ack) -> Result<(), CoordinatorError> {
        send_message(&self.ack_sender, ack, "ack").await
    }
}

// Everything the decision loop takes ownership of when the round starts.
struct Inbound {
    vote_receiver: mpsc::Receiver<Vote>,
    ack_receiver: mpsc::Receiver<Ack>,
    shutdown_receiver: watch::Receiver<bool>,
    status_sender: watch::Sender<CoordinatorStatus>,
}

/// Drives one 2PC round.
///
/// Dropping the coordinator stops its decision loop; [`Coordinator::shutdown`] does the same and
/// waits for the loop to finish.
pub struct Coordinator {
    can_commit_sender: mpsc::Sender<CanCommit>,
    decision_sender: mpsc::Sender<Decision>,
    handle: CoordinatorHandle,
    inbound: Option<Inbound>,
    startup_delay: Duration,
    shutdown_sender: watch::Sender<bool>,
    status_receiver: watch::Receiver<CoordinatorStatus>,
    decision_loop: Option<JoinHandle<()>>,
}

impl Coordinator {
    /// Creates a coordinator which sends polls on `can_commit_sender` and decisions on
    /// `decision_sender`, using the default channel capacity and startup delay.
    ///
    /// Use [`CoordinatorBuilder`](super::CoordinatorBuilder) to change either setting.
    pub fn new(
        can_commit_sender: mpsc::Sender<CanCommit>,
        decision_sender: mpsc::Sender<Decision>,
    ) -> Self {
        Coordinator::from_parts(
            can_commit_sender,
            decision_sender,
            DEFAULT_CHANNEL_CAPACITY,
            DEFAULT_STARTUP_DELAY,
        )
    }

    pub(super) fn from_parts(
        can_commit_sender: mpsc::Sender<CanCommit>,
        decision_sender: mpsc::Sender<Decision>,
        channel_capacity: usize,
        startup_delay: Duration,
    ) -> Self {
        let (vote_sender, vote_receiver) = mpsc::channel(channel_capacity);
        let (ack_sender, ack_receiver) = mpsc::channel(channel_capacity);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let (status_sender, status_receiver) = watch::channel(CoordinatorStatus::default());

        Coordinator {
            can_commit_sender,
            decision_sender,
            handle: CoordinatorHandle {
                vote_sender,
                ack_sender,
            },
            inbound: Some(Inbound {
                vote_receiver,
                ack_receiver,
                shutdown_receiver,
                status_sender,
            }),
            startup_delay,
            shutdown_sender,
            status_receiver,
            decision_loop: None,
        }
    }

    /// Starts a round of `number_of_workers` workers.
    ///
    /// A [`CanCommit`] is sent to each worker in ascending id order before the decision loop is
    /// spawned, so this waits whenever the can-commit channel is full. Once all votes are in, the
    /// loop sends the decisions and publishes the outcome on `final_decision_sender` exactly once.
    ///
    /// Returns after the configured startup delay.
    ///
    /// # Errors
    ///
    /// * [`CoordinatorError::InvalidArgument`] if `number_of_workers` is zero.
    /// * [`CoordinatorError::InvalidState`] if the coordinator was already started or the
    ///   can-commit channel is closed.
    ///
    /// If the can-commit channel closes partway through the broadcast, the workers polled before
    /// the failure have already received their [`CanCommit`] and no decision loop is running. The
    /// coordinator stays unstarted, but its can-commit channel cannot reopen, so every further
    /// `start` fails the same way without polling anyone. Build a new coordinator to run the round
    /// again; its broadcast starts over from the first worker, which polls those workers a second
    /// time.
    pub async fn start(
        &mut self,
        number_of_workers: usize,
        final_decision_sender: mpsc::Sender<Outcome>,
    ) -> Result<(), CoordinatorError> {
        if number_of_workers == 0 {
            return Err(InvalidArgumentError::new(
                "number_of_workers".to_string(),
                "a round requires at least one worker".to_string(),
            )
            .into());
        }

        let inbound = self.inbound.take().ok_or_else(|| {
            InvalidStateError::with_message("coordinator has already been started".into())
        })?;

        info!("Starting round with {} workers", number_of_workers);

        for worker_id in WorkerId::sequence(number_of_workers) {
            if let Err(err) = self.send_can_commit(CanCommit::new(worker_id)).await {
                self.inbound = Some(inbound);
                return Err(err);
            }
        }

        let Inbound {
            vote_receiver,
            ack_receiver,
            shutdown_receiver,
            status_sender,
        } = inbound;

        let decision_loop = DecisionLoop {
            algorithm: CoordinatorAlgorithm::new(),
            context: CoordinatorContext::new(number_of_workers),
            decision_sender: self.decision_sender.clone(),
            final_decision_sender,
            vote_receiver,
            ack_receiver,
            status_sender,
            acks_received: 0,
            messages_dropped: 0,
        };
        decision_loop.publish_status();

        self.decision_loop = Some(tokio::spawn(decision_loop.run(shutdown_receiver)));

        tokio::time::sleep(self.startup_delay).await;

        Ok(())
    }

    pub async fn deliver_vote(&self, vote: Vote) -> Result<(), CoordinatorError> {
        self.handle.deliver_vote(vote).await
    }

    pub async fn deliver_ack(&self, ack: Ack) -> Result<(), CoordinatorError> {
        self.handle.deliver_ack(ack).await
    }

    /// Sends a poll on the can-commit channel. Not ordered against the polls sent by `start`.
    pub async fn send_can_commit(&self, can_commit: CanCommit) -> Result<(), CoordinatorError> {
        debug!("Sending {}", can_commit);
        send_message(&self.can_commit_sender, can_commit, "can-commit").await
    }

    /// Sends a decision on the decision channel. Not ordered against the decision loop's sends.
    pub async fn send_decision(&self, decision: Decision) -> Result<(), CoordinatorError> {
        debug!("Sending {}", decision);
        send_message(&self.decision_sender, decision, "decision").await
    }

    /// Returns a handle through which other tasks can deliver votes and acks.
    pub fn handle(&self) -> CoordinatorHandle {
        self.handle.clone()
    }

    pub fn status(&self) -> watch::Receiver<CoordinatorStatus> {
        self.status_receiver.clone()
    }

    /// Stops the decision loop and waits for it to exit.
    ///
    /// Handles obtained from [`Coordinator::handle`] fail to deliver afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Internal`] if the decision loop panicked.
    pub async fn shutdown(mut self) -> Result<(), CoordinatorError> {
        self.shutdown_sender.send_replace(true);

        match self.decision_loop.take() {
            Some(decision_loop) => decision_loop.await.map_err(|err| {
                CoordinatorError::Internal(InternalError::from_source(Box::new(err)))
            }),
            None => Ok(()),
        }
    }
}

// The single task which owns the tally. It feeds inbound messages to the algorithm and carries
// out the resulting actions.
struct DecisionLoop {
    algorithm: CoordinatorAlgorithm,
    context: CoordinatorContext,
    decision_sender: mpsc::Sender<Decision>,
    final_decision_sender: mpsc::Sender<Outcome>,
    vote_receiver: mpsc::Receiver<Vote>,
    ack_receiver: mpsc::Receiver<Ack>,
    status_sender: watch::Sender<CoordinatorStatus>,
    acks_received: usize,
    messages_dropped: usize,
}

impl DecisionLoop {
    async fn run(mut self, mut shutdown_receiver: watch::Receiver<bool>) {
        debug!(
            "Decision loop waiting for {} votes",
            self.context.number_of_workers()
        );

        loop {
            // No priority between votes and acks; whichever is ready first is taken. A change on
            // the shutdown channel, or the coordinator being dropped, ends the loop.
            let event = tokio::select! {
                _ = shutdown_receiver.changed() => break,
                Some(vote) = self.vote_receiver.recv() => {
                    debug!("Received {}", vote);
                    CoordinatorEvent::from(vote)
                }
                Some(ack) = self.ack_receiver.recv() => {
                    debug!("Received {}", ack);
                    CoordinatorEvent::from(ack)
                }
            };

            // A decision send can wait on a full channel; shutdown must still get through.
            tokio::select! {
                _ = shutdown_receiver.changed() => break,
                _ = self.handle_event(event) => (),
            }
        }

        debug!("Decision loop stopped");
    }

    async fn handle_event(&mut self, event: CoordinatorEvent) {
        let actions = match self.algorithm.event(event, self.context.clone()) {
            Ok(actions) => actions,
            Err(err) => {
                error!("Unable to process {:?}: {}", event, err);
                return;
            }
        };

        for action in actions {
            match action {
                CoordinatorAction::Update { context } => self.context = context,
                CoordinatorAction::SendDecision(decision) => {
                    debug!("Sending {}", decision);
                    if let Err(err) =
                        send_message(&self.decision_sender, decision, "decision").await
                    {
                        error!("Unable to send {}: {}", decision, err);
                    }
                }
                CoordinatorAction::PublishOutcome(outcome) => {
                    info!(
                        "Round decided {} after {} votes",
                        outcome,
                        self.context.votes().len()
                    );
                    if let Err(err) =
                        send_final_decision(&self.final_decision_sender, outcome).await
                    {
                        error!("Unable to publish outcome {}: {}", outcome, err);
                    }
                }
                CoordinatorAction::Notify(CoordinatorActionNotification::AckReceived(
                    worker_id,
                )) => {
                    self.acks_received += 1;
                    trace!("Consumed ack from {}", worker_id);
                }
                CoordinatorAction::Notify(CoordinatorActionNotification::MessageDropped(
                    reason,
                )) => {
                    self.messages_dropped += 1;
                    debug!("Dropped message: {}", reason);
                }
            }
        }

        self.publish_status();
    }

    fn publish_status(&self) {
        self.status_sender.send_replace(CoordinatorStatus {
            started: true,
            state: *self.context.state(),
            votes_received: self.context.votes().len(),
            acks_received: self.acks_received,
            messages_dropped: self.messages_dropped,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::time::timeout;

    use crate::two_phase_commit::CoordinatorBuilder;

    const WAIT: Duration = Duration::from_secs(5);

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    struct Harness {
        coordinator: Coordinator,
        can_commit_receiver: mpsc::Receiver<CanCommit>,
        decision_receiver: mpsc::Receiver<Decision>,
        final_decision_sender: mpsc::Sender<Outcome>,
        final_decision_receiver: mpsc::Receiver<Outcome>,
    }

    fn harness() -> Harness {
        init_logging();
        let (can_commit_sender, can_commit_receiver) = mpsc::channel(64);
        let (decision_sender, decision_receiver) = mpsc::channel(64);
        let (final_decision_sender, final_decision_receiver) = mpsc::channel(4);

        let coordinator = CoordinatorBuilder::new()
            .with_can_commit_sender(can_commit_sender)
            .with_decision_sender(decision_sender)
            .with_startup_delay(Duration::from_millis(1))
            .build()
            .expect("coordinator should build");

        Harness {
            coordinator,
            can_commit_receiver,
            decision_receiver,
            final_decision_sender,
            final_decision_receiver,
        }
    }

    async fn wait_for_status<F>(coordinator: &Coordinator, predicate: F) -> CoordinatorStatus
    where
        F: FnMut(&CoordinatorStatus) -> bool,
    {
        let mut status = coordinator.status();
        let snapshot = timeout(WAIT, status.wait_for(predicate))
            .await
            .expect("timed out waiting for status")
            .expect("status channel closed");
        *snapshot
    }

    #[tokio::test]
    async fn start_polls_workers_in_ascending_order() {
        let mut h = harness();

        h.coordinator
            .start(5, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        let mut polled = Vec::new();
        while let Ok(can_commit) = h.can_commit_receiver.try_recv() {
            polled.push(can_commit.worker_id().value());
        }
        assert_eq!(polled, vec![1, 2, 3, 4, 5]);

        h.coordinator.shutdown().await.expect("shutdown");
    }

    #[tokio::test]
    async fn all_yes_out_of_order_commits_in_arrival_order() {
        let mut h = harness();
        h.coordinator
            .start(3, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        for id in [2, 1, 3] {
            h.coordinator
                .deliver_vote(Vote::yes(WorkerId::new(id)))
                .await
                .expect("vote should be delivered");
        }

        let outcome = timeout(WAIT, h.final_decision_receiver.recv())
            .await
            .expect("timed out waiting for outcome");
        assert_eq!(outcome, Some(Outcome::Commit));

        let mut decisions = Vec::new();
        while let Ok(decision) = h.decision_receiver.try_recv() {
            decisions.push(decision);
        }
        assert_eq!(
            decisions,
            vec![
                Decision::new(WorkerId::new(2), Outcome::Commit),
                Decision::new(WorkerId::new(1), Outcome::Commit),
                Decision::new(WorkerId::new(3), Outcome::Commit),
            ]
        );

        h.coordinator.shutdown().await.expect("shutdown");
    }

    // Worker 2 voted yes in an aborted round and is never sent a decision. This mirrors the
    // established behavior and is probably unintended: in textbook 2PC every participant learns
    // the outcome.
    #[tokio::test]
    async fn abort_is_sent_only_to_the_no_voter() {
        let mut h = harness();
        h.coordinator
            .start(2, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        h.coordinator
            .deliver_vote(Vote::no(WorkerId::new(1)))
            .await
            .expect("vote should be delivered");
        h.coordinator
            .deliver_vote(Vote::yes(WorkerId::new(2)))
            .await
            .expect("vote should be delivered");

        let outcome = timeout(WAIT, h.final_decision_receiver.recv())
            .await
            .expect("timed out waiting for outcome");
        assert_eq!(outcome, Some(Outcome::Abort));

        assert_eq!(
            h.decision_receiver.try_recv(),
            Ok(Decision::new(WorkerId::new(1), Outcome::Abort))
        );
        assert_eq!(h.decision_receiver.try_recv(), Err(TryRecvError::Empty));

        h.coordinator.shutdown().await.expect("shutdown");
    }

    #[tokio::test]
    async fn no_decision_until_every_vote_is_in() {
        let mut h = harness();
        h.coordinator
            .start(4, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        for id in 1..=3 {
            h.coordinator
                .deliver_vote(Vote::yes(WorkerId::new(id)))
                .await
                .expect("vote should be delivered");
        }

        let status = wait_for_status(&h.coordinator, |status| status.votes_received == 3).await;
        assert_eq!(status.state, CoordinatorState::Collecting);
        assert_eq!(h.decision_receiver.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(
            h.final_decision_receiver.try_recv(),
            Err(TryRecvError::Empty)
        );

        h.coordinator
            .deliver_vote(Vote::yes(WorkerId::new(4)))
            .await
            .expect("vote should be delivered");
        let outcome = timeout(WAIT, h.final_decision_receiver.recv())
            .await
            .expect("timed out waiting for outcome");
        assert_eq!(outcome, Some(Outcome::Commit));

        h.coordinator.shutdown().await.expect("shutdown");
    }

    #[tokio::test]
    async fn acks_are_drained_without_changing_the_round() {
        let mut h = harness();

        // Delivered before the round starts; buffered until the loop runs.
        h.coordinator
            .deliver_ack(Ack::new(WorkerId::new(9)))
            .await
            .expect("ack should be delivered");

        h.coordinator
            .start(2, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        let handle = h.coordinator.handle();
        handle
            .deliver_vote(Vote::yes(WorkerId::new(1)))
            .await
            .expect("vote should be delivered");
        handle
            .deliver_ack(Ack::new(WorkerId::new(1)))
            .await
            .expect("ack should be delivered");
        handle
            .deliver_vote(Vote::yes(WorkerId::new(2)))
            .await
            .expect("vote should be delivered");

        let outcome = timeout(WAIT, h.final_decision_receiver.recv())
            .await
            .expect("timed out waiting for outcome");
        assert_eq!(outcome, Some(Outcome::Commit));

        for id in 1..=2 {
            handle
                .deliver_ack(Ack::new(WorkerId::new(id)))
                .await
                .expect("ack should be delivered");
        }

        let status = wait_for_status(&h.coordinator, |status| status.acks_received == 4).await;
        assert_eq!(status.votes_received, 2);
        assert_eq!(status.state, CoordinatorState::Decided(Outcome::Commit));

        let mut decisions = Vec::new();
        while let Ok(decision) = h.decision_receiver.try_recv() {
            decisions.push(decision);
        }
        assert_eq!(decisions.len(), 2);
        assert_eq!(
            h.final_decision_receiver.try_recv(),
            Err(TryRecvError::Empty)
        );

        h.coordinator.shutdown().await.expect("shutdown");
    }

    #[tokio::test]
    async fn outcome_is_published_once_despite_late_votes() {
        let mut h = harness();
        h.coordinator
            .start(1, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        h.coordinator
            .deliver_vote(Vote::no(WorkerId::new(1)))
            .await
            .expect("vote should be delivered");
        h.coordinator
            .deliver_vote(Vote::yes(WorkerId::new(1)))
            .await
            .expect("vote should be delivered");

        let status = wait_for_status(&h.coordinator, |status| status.messages_dropped == 1).await;
        assert_eq!(status.state, CoordinatorState::Decided(Outcome::Abort));

        assert_eq!(h.final_decision_receiver.recv().await, Some(Outcome::Abort));
        assert_eq!(
            h.final_decision_receiver.try_recv(),
            Err(TryRecvError::Empty)
        );

        h.coordinator.shutdown().await.expect("shutdown");
    }

    #[tokio::test]
    async fn start_rejects_zero_workers_and_restarts() {
        let mut h = harness();

        let zero = h.coordinator.start(0, h.final_decision_sender.clone()).await;
        assert!(matches!(zero, Err(CoordinatorError::InvalidArgument(_))));

        h.coordinator
            .start(1, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        let again = h.coordinator.start(1, h.final_decision_sender.clone()).await;
        assert!(matches!(again, Err(CoordinatorError::InvalidState(_))));

        h.coordinator.shutdown().await.expect("shutdown");
    }

    #[tokio::test]
    async fn start_fails_when_workers_are_gone() {
        let mut h = harness();
        drop(h.can_commit_receiver);

        let result = h.coordinator.start(2, h.final_decision_sender.clone()).await;
        assert!(matches!(result, Err(CoordinatorError::InvalidState(_))));
        assert!(!h.coordinator.status().borrow().started);
    }

    #[tokio::test]
    async fn start_reports_a_broadcast_cut_short() {
        init_logging();
        let (can_commit_sender, mut can_commit_receiver) = mpsc::channel(1);
        let (decision_sender, _decision_receiver) = mpsc::channel(1);
        let (final_decision_sender, _final_decision_receiver) = mpsc::channel(1);

        let mut coordinator = CoordinatorBuilder::new()
            .with_can_commit_sender(can_commit_sender)
            .with_decision_sender(decision_sender)
            .with_startup_delay(Duration::ZERO)
            .build()
            .expect("coordinator should build");

        // Reads a single poll, then goes away while the broadcast is still running.
        let worker = tokio::spawn(async move {
            let first = can_commit_receiver.recv().await;
            drop(can_commit_receiver);
            first
        });

        let result = timeout(WAIT, coordinator.start(3, final_decision_sender.clone()))
            .await
            .expect("timed out waiting for start");
        assert!(matches!(result, Err(CoordinatorError::InvalidState(_))));
        assert_eq!(
            worker.await.expect("worker task"),
            Some(CanCommit::new(WorkerId::new(1)))
        );
        assert!(!coordinator.status().borrow().started);

        let retry = timeout(WAIT, coordinator.start(3, final_decision_sender))
            .await
            .expect("timed out waiting for start");
        assert!(matches!(retry, Err(CoordinatorError::InvalidState(_))));
        assert!(!coordinator.status().borrow().started);
    }

    #[tokio::test]
    async fn shutdown_stops_the_loop() {
        let mut h = harness();
        h.coordinator
            .start(3, h.final_decision_sender.clone())
            .await
            .expect("start should succeed");

        let handle = h.coordinator.handle();
        let status = h.coordinator.status();

        timeout(WAIT, h.coordinator.shutdown())
            .await
            .expect("timed out waiting for shutdown")
            .expect("shutdown");

        let result = handle.deliver_vote(Vote::yes(WorkerId::new(1))).await;
        assert!(matches!(result, Err(CoordinatorError::InvalidState(_))));
        assert!(status.has_changed().is_err());
    }

    #[tokio::test]
    async fn shutdown_interrupts_a_blocked_decision_send() {
        init_logging();
        let (can_commit_sender, _can_commit_receiver) = mpsc::channel(4);
        // Room for one decision only, and nobody reading.
        let (decision_sender, _decision_receiver) = mpsc::channel(1);
        let (final_decision_sender, _final_decision_receiver) = mpsc::channel(1);

        let mut coordinator = CoordinatorBuilder::new()
            .with_can_commit_sender(can_commit_sender)
            .with_decision_sender(decision_sender)
            .with_startup_delay(Duration::ZERO)
            .build()
            .expect("coordinator should build");
        coordinator
            .start(3, final_decision_sender)
            .await
            .expect("start should succeed");

        for id in 1..=3 {
            coordinator
                .deliver_vote(Vote::yes(WorkerId::new(id)))
                .await
                .expect("vote should be delivered");
        }

        timeout(WAIT, coordinator.shutdown())
            .await
            .expect("timed out waiting for shutdown")
            .expect("shutdown");
    }

    #[tokio::test]
    async fn send_primitives_use_the_outbound_channels() {
        let mut h = harness();

        h.coordinator
            .send_can_commit(CanCommit::new(WorkerId::new(8)))
            .await
            .expect("send should succeed");
        h.coordinator
            .send_decision(Decision::new(WorkerId::new(8), Outcome::Abort))
            .await
            .expect("send should succeed");

        assert_eq!(
            h.can_commit_receiver.try_recv(),
            Ok(CanCommit::new(WorkerId::new(8)))
        );
        assert_eq!(
            h.decision_receiver.try_recv(),
            Ok(Decision::new(WorkerId::new(8), Outcome::Abort))
        );

        send_final_decision(&h.final_decision_sender, Outcome::Commit)
            .await
            .expect("publish should succeed");
        assert_eq!(h.final_decision_receiver.try_recv(), Ok(Outcome::Commit));
    }
}
