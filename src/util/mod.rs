pub(crate) mod itime;
