//! 浏览器会话状态
//!
//! 每个浏览器通过 `store_session` cookie 对应一份 [`Session`]。页面每次重新执行时
//! 都在同一把锁内读写这份状态。只有提交表单才会新建会话；空闲超时的会话
//! 在访问时按固定间隔批量清理。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::error::CoreError;

pub const SESSION_COOKIE: &str = "store_session";

/// 单个浏览器会话
#[derive(Debug, Clone)]
pub struct Session {
    buy_clicked: bool,
    quantity: Option<u32>,
    last_seen: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            buy_clicked: false,
            quantity: None,
            last_seen: now,
        }
    }

    /// 购买表单已提交
    pub fn mark_buy_clicked(&mut self) {
        self.buy_clicked = true;
    }

    /// 读取购买标记并立即复位，保证提示只出现一次
    pub fn take_buy_clicked(&mut self) -> bool {
        std::mem::take(&mut self.buy_clicked)
    }

    #[cfg(test)]
    fn buy_clicked(&self) -> bool {
        self.buy_clicked
    }

    /// 上一次选择的数量
    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = Some(quantity);
    }

    fn is_active(&self, now: DateTime<Utc>, idle: Duration) -> bool {
        now - self.last_seen <= idle
    }
}

/// 一次会话访问的结果
#[derive(Debug)]
pub struct SessionRun<R> {
    /// 未保存会话（只读访问且没有有效 cookie）时为 `None`
    pub id: Option<Uuid>,
    /// 本次请求新建了会话，需要下发 cookie
    pub created: bool,
    pub output: R,
}

impl<R> SessionRun<R> {
    /// 新会话需要的 `Set-Cookie` 值
    pub fn set_cookie(&self) -> Option<String> {
        self.id
            .filter(|_| self.created)
            .map(cookie_value)
    }
}

/// 两次全量清理之间的最短间隔
const SWEEP_INTERVAL_SECS: i64 = 60;

struct Sessions {
    map: HashMap<Uuid, Session>,
    next_sweep: DateTime<Utc>,
}

/// 内存会话存储
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Sessions>>,
    idle: Duration,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Sessions {
                map: HashMap::new(),
                next_sweep: Utc::now(),
            })),
            idle,
        }
    }

    /// 定位请求所属会话，在锁内执行 `f`
    ///
    /// 找不到有效会话时：`create` 为真则新建并保存；否则 `f` 作用于一份
    /// 不保存的空白会话，不下发 cookie。
    pub fn run<R>(
        &self,
        headers: &HeaderMap,
        create: bool,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<SessionRun<R>, CoreError> {
        self.run_at(Utc::now(), headers, create, f)
    }

    fn run_at<R>(
        &self,
        now: DateTime<Utc>,
        headers: &HeaderMap,
        create: bool,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<SessionRun<R>, CoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| CoreError::InternalServerError("会话存储锁已损坏".to_string()))?;
        let sessions = &mut *guard;

        if now >= sessions.next_sweep {
            evict_idle(&mut sessions.map, now, self.idle);
            sessions.next_sweep = now + Duration::seconds(SWEEP_INTERVAL_SECS);
        }

        let existing = session_id(headers).filter(|id| match sessions.map.get(id) {
            Some(session) => session.is_active(now, self.idle),
            None => false,
        });

        let (id, created) = match existing {
            Some(id) => (id, false),
            None if create => (Uuid::new_v4(), true),
            None => {
                let mut transient = Session::new(now);
                return Ok(SessionRun {
                    id: None,
                    created: false,
                    output: f(&mut transient),
                });
            }
        };

        let session = sessions.map.entry(id).or_insert_with(|| Session::new(now));
        session.last_seen = now;
        let output = f(session);

        Ok(SessionRun {
            id: Some(id),
            created,
            output,
        })
    }

    /// 当前保存的会话数
    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().map(|s| s.map.len()).unwrap_or(0)
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, Session>, now: DateTime<Utc>, idle: Duration) {
    sessions.retain(|_, session| session.is_active(now, idle));
}

/// 从 `Cookie` 请求头中取出会话 ID
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

fn cookie_value(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
