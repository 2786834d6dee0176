#![allow(dead_code)]

use std::{
    collections::{BTreeMap, HashSet},
    convert::Infallible,
    io,
    ops::{Bound, Range, RangeBounds},
};

use bytes::Bytes;
use mapwire::{
    commands::{
        request::{parse_request, Request},
        response::{encode_response, Payload, Response, ResponseFlags},
    },
    operations::map::{OpType, OrderType, RangeFlags, ReturnModifiers, ReturnType},
    MapKey, ResultCode, Transport, Value,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logger() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

type Outcome<T> = Result<T, ResultCode>;

/// In-memory stand-in for a server holding a single map. Items are kept sorted by key, which
/// doubles as the index order for every map type.
#[derive(Debug, Default)]
pub struct MockServer {
    pub map: BTreeMap<MapKey, Value>,
    pub order: OrderType,
    pub requests: Vec<Request>,
}

impl MockServer {
    pub fn new(order: OrderType) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn with_entries<K, V>(order: OrderType, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<MapKey>,
        V: Into<Value>,
    {
        Self {
            map: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            order,
            requests: Vec::new(),
        }
    }

    pub fn last_request(&self) -> &Request {
        self.requests.last().expect("no request received")
    }

    fn handle(&mut self, request: &Request) -> Response {
        self.apply(request).unwrap_or_else(Response::error)
    }

    fn apply(&mut self, req: &Request) -> Outcome<Response> {
        match req.op {
            OpType::SetType => {
                self.order = order_arg(req.args.first())?;
                Ok(Response::ok(ResponseFlags::empty(), Payload::None))
            }
            OpType::Put | OpType::Replace | OpType::Add => {
                let created = self.map.is_empty();
                let key = key_arg(req.args.first())?;
                let value = req.args.get(1).cloned().ok_or(ResultCode::ParameterError)?;
                self.write(req.op, key, value)?;
                self.create_order(created, req.args.get(2))?;
                Ok(self.count(self.map.len()))
            }
            OpType::PutItems | OpType::ReplaceItems | OpType::AddItems => {
                let created = self.map.is_empty();
                let Some(Value::HashMap(items)) = req.args.first() else {
                    return Err(ResultCode::ParameterError);
                };
                let single = match req.op {
                    OpType::PutItems => OpType::Put,
                    OpType::ReplaceItems => OpType::Replace,
                    _ => OpType::Add,
                };
                for (k, v) in items {
                    self.write(single, k.clone(), v.clone())?;
                }
                self.create_order(created, req.args.get(1))?;
                Ok(self.count(self.map.len()))
            }
            OpType::Increment | OpType::Decrement => {
                let created = self.map.is_empty();
                let key = key_arg(req.args.first())?;
                let delta = req.int_arg(1).ok_or(ResultCode::ParameterError)?;
                let current = match self.map.get(&key) {
                    Some(v) => v.as_i64().ok_or(ResultCode::OpNotApplicable)?,
                    None => 0,
                };
                let new = if req.op == OpType::Increment {
                    current + delta
                } else {
                    current - delta
                };
                self.map.insert(key, Value::from(new));
                self.create_order(created, req.args.get(2))?;
                Ok(Response::ok(
                    ResponseFlags::empty(),
                    Payload::Value(Value::from(new)),
                ))
            }
            OpType::Clear => {
                self.map.clear();
                Ok(Response::ok(ResponseFlags::empty(), Payload::None))
            }
            OpType::Size => Ok(self.count(self.map.len())),
            _ => self.select(req),
        }
    }

    fn write(&mut self, op: OpType, key: MapKey, value: Value) -> Outcome<()> {
        match op {
            OpType::Replace if !self.map.contains_key(&key) => Err(ResultCode::ElementNotFound),
            OpType::Add if self.map.contains_key(&key) => Err(ResultCode::ElementExists),
            _ => {
                self.map.insert(key, value);
                Ok(())
            }
        }
    }

    fn create_order(&mut self, created: bool, arg: Option<&Value>) -> Outcome<()> {
        if created && arg.is_some() {
            self.order = order_arg(arg)?;
        }
        Ok(())
    }

    fn count(&self, count: usize) -> Response {
        Response::ok(
            ResponseFlags::empty(),
            Payload::Value(Value::from(count as i64)),
        )
    }

    fn select(&mut self, req: &Request) -> Outcome<Response> {
        let entries = self
            .map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Vec<_>>();
        let len = entries.len();

        let (mut selected, mut single) = match req.op {
            OpType::GetByKey | OpType::RemoveByKey => {
                let key = key_arg(req.args.first())?;
                (positions(&entries, |k, _| *k == key), true)
            }
            OpType::GetByKeyList | OpType::RemoveKeyList => {
                let keys = list_arg(req.args.first())?
                    .iter()
                    .map(|v| key_arg(Some(v)))
                    .collect::<Outcome<HashSet<_>>>()?;
                (positions(&entries, |k, _| keys.contains(k)), false)
            }
            OpType::GetByKeyInterval | OpType::RemoveByKeyInterval => {
                let (begin, end) = range_args(req, |v| key_arg(Some(v)))?;
                let range = (begin.as_ref(), end.as_ref());
                (positions(&entries, |k, _| range.contains(k)), false)
            }
            OpType::GetByKeyRelIndexRange | OpType::RemoveByKeyRelIndexRange => {
                let key = key_arg(req.args.first())?;
                let index = req.int_arg(1).ok_or(ResultCode::ParameterError)?;
                let anchor = entries.partition_point(|(k, _)| *k < key);
                let range = relative_range(anchor as i64 + index, req.int_arg(2), len);
                (range.collect(), false)
            }
            OpType::GetByValue | OpType::RemoveByValue => {
                let value = req.args.first().ok_or(ResultCode::ParameterError)?;
                (positions(&entries, |_, v| v == value), false)
            }
            OpType::GetByValueList | OpType::RemoveValueList => {
                let values = list_arg(req.args.first())?;
                (positions(&entries, |_, v| values.contains(v)), false)
            }
            OpType::GetByValueInterval | OpType::RemoveByValueInterval => {
                let (begin, end) = range_args(req, int_value)?;
                let range = (begin.as_ref(), end.as_ref());
                (
                    positions(&entries, |_, v| v.as_i64().map_or(false, |v| range.contains(&v))),
                    false,
                )
            }
            OpType::GetByValueRelRankRange | OpType::RemoveByValueRelRankRange => {
                let value = int_value(req.args.first().ok_or(ResultCode::ParameterError)?)?;
                let rank = req.int_arg(1).ok_or(ResultCode::ParameterError)?;
                let ranked = rank_order(&entries)?;
                let anchor = ranked.partition_point(|&i| entries[i].1.as_i64() < Some(value));
                let range = relative_range(anchor as i64 + rank, req.int_arg(2), len);
                (ranked[range].to_vec(), false)
            }
            OpType::GetByIndex | OpType::RemoveByIndex => {
                let index = req.int_arg(0).ok_or(ResultCode::ParameterError)?;
                (absolute_range(index, Some(1), len).collect(), true)
            }
            OpType::GetByIndexRange | OpType::RemoveByIndexRange => {
                let index = req.int_arg(0).ok_or(ResultCode::ParameterError)?;
                (absolute_range(index, req.int_arg(1), len).collect(), false)
            }
            OpType::GetByRank | OpType::RemoveByRank => {
                let rank = req.int_arg(0).ok_or(ResultCode::ParameterError)?;
                let ranked = rank_order(&entries)?;
                (ranked[absolute_range(rank, Some(1), len)].to_vec(), true)
            }
            OpType::GetByRankRange | OpType::RemoveByRankRange => {
                let rank = req.int_arg(0).ok_or(ResultCode::ParameterError)?;
                let ranked = rank_order(&entries)?;
                (ranked[absolute_range(rank, req.int_arg(1), len)].to_vec(), false)
            }
            _ => return Err(ResultCode::ParameterError),
        };

        if req.is_inverted() {
            selected = (0..len).filter(|i| !selected.contains(i)).collect();
            single = false;
        }

        let response = self.build_response(req, &entries, &selected, single)?;

        if req.op.is_write() {
            for &i in &selected {
                self.map.remove(&entries[i].0);
            }
        }

        Ok(response)
    }

    fn build_response(
        &self,
        req: &Request,
        entries: &[(MapKey, Value)],
        selected: &[usize],
        single: bool,
    ) -> Outcome<Response> {
        let len = entries.len() as i64;
        let ranks = || -> Outcome<Vec<usize>> {
            let ranked = rank_order(entries)?;
            let mut ranks = vec![0; entries.len()];
            for (rank, &i) in ranked.iter().enumerate() {
                ranks[i] = rank;
            }
            Ok(ranks)
        };

        let values: Vec<Value> = match req.return_type {
            ReturnType::None => {
                return Ok(Response::ok(ResponseFlags::empty(), Payload::None));
            }
            ReturnType::Count => return Ok(self.count(selected.len())),
            ReturnType::KeyValue => {
                let flags = if req.modifiers.contains(ReturnModifiers::PAIR_LIST) {
                    ResponseFlags::LIST
                } else if self.order == OrderType::Unordered {
                    ResponseFlags::empty()
                } else {
                    ResponseFlags::ORDERED_MAP
                };
                let pairs = selected.iter().map(|&i| entries[i].clone()).collect();
                return Ok(Response::ok(flags, Payload::Entries(pairs)));
            }
            ReturnType::Index => selected.iter().map(|&i| Value::from(i as i64)).collect(),
            ReturnType::ReverseIndex => selected
                .iter()
                .map(|&i| Value::from(len - 1 - i as i64))
                .collect(),
            ReturnType::Rank => {
                let ranks = ranks()?;
                selected
                    .iter()
                    .map(|&i| Value::from(ranks[i] as i64))
                    .collect()
            }
            ReturnType::ReverseRank => {
                let ranks = ranks()?;
                selected
                    .iter()
                    .map(|&i| Value::from(len - 1 - ranks[i] as i64))
                    .collect()
            }
            ReturnType::Key => selected
                .iter()
                .map(|&i| Value::from(entries[i].0.clone()))
                .collect(),
            ReturnType::Value => selected.iter().map(|&i| entries[i].1.clone()).collect(),
        };

        Ok(if single {
            let value = values.into_iter().next().unwrap_or(Value::Nil);
            Response::ok(ResponseFlags::empty(), Payload::Value(value))
        } else {
            Response::ok(ResponseFlags::LIST, Payload::Value(Value::List(values)))
        })
    }
}

impl Transport for MockServer {
    type Error = Infallible;

    fn send(&mut self, request: Bytes) -> Result<Bytes, Self::Error> {
        let response = match parse_request(&request) {
            Ok(req) => {
                let response = self.handle(&req);
                self.requests.push(req);
                response
            }
            Err(e) => {
                tracing::warn!(error = %e, "mock server received an invalid request");
                Response::error(ResultCode::ParameterError)
            }
        };

        Ok(encode_response(&response).expect("response exceeds the wire format"))
    }
}

/// Transport whose connection is always gone.
#[derive(Debug, Default)]
pub struct Disconnected;

impl Transport for Disconnected {
    type Error = io::Error;

    fn send(&mut self, _: Bytes) -> Result<Bytes, Self::Error> {
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))
    }
}

/// Transport answering every request with the same bytes.
#[derive(Debug)]
pub struct Canned(pub Bytes);

impl Transport for Canned {
    type Error = Infallible;

    fn send(&mut self, _: Bytes) -> Result<Bytes, Self::Error> {
        Ok(self.0.clone())
    }
}

fn positions(entries: &[(MapKey, Value)], f: impl Fn(&MapKey, &Value) -> bool) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, (k, v))| f(k, v))
        .map(|(i, _)| i)
        .collect()
}

/// Entry positions sorted by value, then by key. Only integer values can be ranked.
fn rank_order(entries: &[(MapKey, Value)]) -> Outcome<Vec<usize>> {
    let values = entries
        .iter()
        .map(|(_, v)| v.as_i64().ok_or(ResultCode::OpNotApplicable))
        .collect::<Outcome<Vec<_>>>()?;
    let mut ranked = (0..entries.len()).collect::<Vec<_>>();
    ranked.sort_by_key(|&i| values[i]);
    Ok(ranked)
}

/// Range for an index or rank that counts from the end when negative.
fn absolute_range(start: i64, count: Option<i64>, len: usize) -> Range<usize> {
    let start = if start < 0 { len as i64 + start } else { start };
    relative_range(start, count, len)
}

/// Clamp `start..start + count` to the map, shortening it if it starts before the first item.
fn relative_range(start: i64, count: Option<i64>, len: usize) -> Range<usize> {
    let len = len as i64;
    let end = count.map_or(len, |count| start.saturating_add(count.max(0)));
    let start = start.clamp(0, len);
    let end = end.clamp(start, len);
    start as usize..end as usize
}

fn key_arg(value: Option<&Value>) -> Outcome<MapKey> {
    value
        .cloned()
        .and_then(|v| MapKey::try_from(v).ok())
        .ok_or(ResultCode::ParameterError)
}

fn list_arg(value: Option<&Value>) -> Outcome<&[Value]> {
    value
        .and_then(Value::as_list)
        .ok_or(ResultCode::ParameterError)
}

fn int_value(value: &Value) -> Outcome<i64> {
    value.as_i64().ok_or(ResultCode::ParameterError)
}

fn order_arg(value: Option<&Value>) -> Outcome<OrderType> {
    value
        .and_then(Value::as_i64)
        .and_then(|v| u8::try_from(v).ok())
        .and_then(|v| OrderType::try_from(v).ok())
        .ok_or(ResultCode::ParameterError)
}

fn range_args<T>(
    req: &Request,
    convert: impl Fn(&Value) -> Outcome<T>,
) -> Outcome<(Bound<T>, Bound<T>)> {
    let flags = req
        .int_arg(2)
        .and_then(|v| u8::try_from(v).ok())
        .map(RangeFlags::from_bits_truncate)
        .ok_or(ResultCode::ParameterError)?;
    let arg = |i: usize| req.args.get(i).ok_or(ResultCode::ParameterError).and_then(&convert);

    let begin = if flags.contains(RangeFlags::BEGIN_UNBOUNDED) {
        Bound::Unbounded
    } else if flags.contains(RangeFlags::BEGIN_EXCLUSIVE) {
        Bound::Excluded(arg(0)?)
    } else {
        Bound::Included(arg(0)?)
    };
    let end = if flags.contains(RangeFlags::END_UNBOUNDED) {
        Bound::Unbounded
    } else if flags.contains(RangeFlags::END_INCLUSIVE) {
        Bound::Included(arg(1)?)
    } else {
        Bound::Excluded(arg(1)?)
    };

    Ok((begin, end))
}
