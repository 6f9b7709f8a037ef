use serde::Serialize;

/// API 业务错误码
///
/// 按模块分段：通用 1xxx，认证/用户 2xxx，班级 3xxx，
/// 资料/作业/成就 4xxx，服务端 5xxx。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,

    // 认证与用户
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNotFound = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserBirthDateInvalid = 2006,
    UserNameAlreadyExists = 2007,
    UserEmailAlreadyExists = 2008,

    // 班级
    ClassNotFound = 3000,
    ClassNameInvalid = 3001,
    ClassCodeInvalid = 3002,
    ClassPermissionDenied = 3003,
    ClassAlreadyJoined = 3004,
    ClassNotJoined = 3005,
    ClassCodeConflict = 3006,
    ClassListEmpty = 3007,

    // 资料
    MaterialNotFound = 4000,
    MaterialInvalid = 4001,

    // 作业
    AssignmentNotFound = 4100,
    AssignmentInvalid = 4101,
    AssignmentListEmpty = 4102,
    AssignmentAlreadySubmitted = 4103,
    AssignmentPermissionDenied = 4104,

    // 成就
    AchievementInvalid = 4200,
    AchievementPermissionDenied = 4201,

    // 服务端
    InternalServerError = 5000,
    StorageUnavailable = 5003,
}
