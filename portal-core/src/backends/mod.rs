// 设备 /scan 的替身；真实设备端的扫描不在本仓库实现
pub mod mock;
