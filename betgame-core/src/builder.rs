//! Programmable transaction description for `place_bet`.
//!
//! The intent mirrors the shape of a Sui programmable transaction block:
//! a list of inputs and a list of commands whose arguments point either at
//! inputs, at the gas coin, or at results of earlier commands.

use crate::types::{MoveCallTarget, ObjectId};
use crate::validator::ValidatedBet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PureValue {
    U8(u8),
    U64(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// Object passed by reference; resolved to its current version at signing.
    Object(ObjectId),
    Pure(PureValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SplitCoins {
        coin: Argument,
        amounts: Vec<Argument>,
    },
    MoveCall {
        target: MoveCallTarget,
        arguments: Vec<Argument>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIntent {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

impl TransactionIntent {
    pub fn input(&self, arg: Argument) -> Option<&CallArg> {
        match arg {
            Argument::Input(idx) => self.inputs.get(idx as usize),
            _ => None,
        }
    }

    /// The Move call this transaction ends with.
    pub fn move_call(&self) -> Option<(&MoveCallTarget, &[Argument])> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            Command::MoveCall { target, arguments } => Some((target, arguments.as_slice())),
            _ => None,
        })
    }

    /// Amount split off the gas coin, in MIST.
    pub fn bet_amount(&self) -> Option<u64> {
        self.commands.iter().find_map(|cmd| match cmd {
            Command::SplitCoins {
                coin: Argument::GasCoin,
                amounts,
            } => match amounts.first().and_then(|a| self.input(*a)) {
                Some(CallArg::Pure(PureValue::U64(amount))) => Some(*amount),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn bet_choice(&self) -> Option<u8> {
        let (_, args) = self.move_call()?;
        match args.get(2).and_then(|a| self.input(*a)) {
            Some(CallArg::Pure(PureValue::U8(choice))) => Some(*choice),
            _ => None,
        }
    }

    pub fn game_object(&self) -> Option<ObjectId> {
        let (_, args) = self.move_call()?;
        match args.first().and_then(|a| self.input(*a)) {
            Some(CallArg::Object(id)) => Some(*id),
            _ => None,
        }
    }
}

const GAME_INPUT: u16 = 0;
const AMOUNT_INPUT: u16 = 1;
const CHOICE_INPUT: u16 = 2;

/// `place_bet(game, split(gas, amount), choice)`.
pub fn build_place_bet(
    target: &MoveCallTarget,
    game_id: ObjectId,
    bet: ValidatedBet,
) -> TransactionIntent {
    let inputs = vec![
        CallArg::Object(game_id),
        CallArg::Pure(PureValue::U64(bet.amount())),
        CallArg::Pure(PureValue::U8(bet.choice())),
    ];

    let commands = vec![
        Command::SplitCoins {
            coin: Argument::GasCoin,
            amounts: vec![Argument::Input(AMOUNT_INPUT)],
        },
        Command::MoveCall {
            target: target.clone(),
            arguments: vec![
                Argument::Input(GAME_INPUT),
                Argument::NestedResult(0, 0),
                Argument::Input(CHOICE_INPUT),
            ],
        },
    ];

    tracing::debug!(
        "Built place_bet intent: {} MIST on choice {} for game {}",
        bet.amount(),
        bet.choice(),
        game_id
    );

    TransactionIntent { inputs, commands }
}
