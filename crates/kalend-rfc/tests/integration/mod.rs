mod dst;
mod export;
mod helpers;
mod oracle;
mod properties;
mod recurrence_set;
