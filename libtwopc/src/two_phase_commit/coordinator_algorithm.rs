// Copyright 2021 Cargill Incorporated
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

use crate::algorithm::Algorithm;
use crate::error::{AlgorithmError, InvalidStateError};

use super::CoordinatorAction;
use super::CoordinatorActionNotification;
use super::CoordinatorContext;
use super::CoordinatorEvent;
use super::CoordinatorMessage;
use super::CoordinatorState;
use super::Decision;
use super::Outcome;
use super::VoteValue;

/// The vote tally and decision rules of a 2PC coordinator.
#[derive(Clone, Debug, Default)]
pub struct CoordinatorAlgorithm;

impl CoordinatorAlgorithm {
    pub fn new() -> Self {
        CoordinatorAlgorithm
    }

    // Create actions for the decision. This is run exactly once per round, from the event which
    // filled the tally.
    //
    // Votes are classified in tally order. Every No vote is sent an Abort decision as soon as it
    // is classified. Only when every vote was Yes is a Commit decision sent, to every worker in
    // tally order. Yes voters in an aborted round are not sent anything.
    fn push_decision_actions(
        &self,
        mut context: CoordinatorContext,
        actions: &mut Vec<CoordinatorAction>,
    ) {
        let mut commit_count = 0;
        let mut outcome = Outcome::Abort;
        let mut decisions = Vec::with_capacity(context.votes().len());

        for vote in context.votes() {
            match vote.value() {
                VoteValue::Yes => commit_count += 1,
                VoteValue::No => {
                    decisions.push(Decision::new(vote.worker_id(), Outcome::Abort));
                    outcome = Outcome::Abort;
                }
            }
        }

        if commit_count == context.number_of_workers() {
            decisions.extend(
                context
                    .votes()
                    .iter()
                    .map(|vote| Decision::new(vote.worker_id(), Outcome::Commit)),
            );
            outcome = Outcome::Commit;
        }

        // The order of actions here is important! The state must be updated to Decided before
        // any decision is sent, so a vote racing in behind the last one is dropped.
        context.set_state(CoordinatorState::Decided(outcome));
        actions.push(CoordinatorAction::Update { context });

        actions.extend(decisions.into_iter().map(CoordinatorAction::SendDecision));

        actions.push(CoordinatorAction::PublishOutcome(outcome));
    }
}

impl Algorithm for CoordinatorAlgorithm {
    type Event = CoordinatorEvent;
    type Action = CoordinatorAction;
    type Context = CoordinatorContext;

    fn event(
        &self,
        event: Self::Event,
        mut context: Self::Context,
    ) -> Result<Vec<Self::Action>, AlgorithmError> {
        if context.number_of_workers() == 0 {
            return Err(AlgorithmError::InvalidState(
                InvalidStateError::with_message(
                    "a round requires at least one worker".into(),
                ),
            ));
        }

        match event {
            // A worker has answered CanCommit. Record the vote and, if it was the last one
            // expected, decide.
            CoordinatorEvent::Deliver(CoordinatorMessage::Vote(vote)) => {
                // Votes arriving after the decision can never reach the tally.
                if let CoordinatorState::Decided(outcome) = context.state() {
                    return Ok(vec![CoordinatorAction::Notify(
                        CoordinatorActionNotification::MessageDropped(format!(
                            "{} arrived after the round decided {}",
                            vote, outcome
                        )),
                    )]);
                }

                if context.is_tally_complete() {
                    return Ok(vec![CoordinatorAction::Notify(
                        CoordinatorActionNotification::MessageDropped(format!(
                            "{} exceeds the {} expected votes",
                            vote,
                            context.number_of_workers()
                        )),
                    )]);
                }

                let mut actions = Vec::new();

                context.record_vote(vote);

                if context.is_tally_complete() {
                    self.push_decision_actions(context, &mut actions);
                } else {
                    actions.push(CoordinatorAction::Update { context });
                }

                Ok(actions)
            }

            // Acks carry no protocol weight; they are consumed and reported only.
            CoordinatorEvent::Deliver(CoordinatorMessage::Ack(ack)) => {
                Ok(vec![CoordinatorAction::Notify(
                    CoordinatorActionNotification::AckReceived(ack.worker_id()),
                )])
            }
        }
    }
}
